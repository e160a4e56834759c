//! Behavioural scenarios for account identifier validation.

use myrig::{AccountError, AccountIdentifier, MySqlVersion, parse_and_normalize};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Clone, Debug, Default)]
struct ValidationRequest {
    version: Option<MySqlVersion>,
}

#[derive(Clone, Debug)]
struct ValidationOutcome(Result<AccountIdentifier, AccountError>);

#[fixture]
fn request() -> ValidationRequest {
    ValidationRequest::default()
}

#[fixture]
fn outcome() -> ValidationOutcome {
    ValidationOutcome(Err(AccountError::InvalidIdentifier {
        value: String::new(),
    }))
}

#[given("the server version is \"{version}\"")]
fn server_version(version: String) -> ValidationRequest {
    let parsed = MySqlVersion::parse(&version)
        .unwrap_or_else(|err| panic!("scenario version {version} should parse: {err}"));
    ValidationRequest {
        version: Some(parsed),
    }
}

#[given("no server version is known")]
fn no_server_version() -> ValidationRequest {
    ValidationRequest::default()
}

#[when("I validate the account \"{raw}\"")]
fn validate_account(request: &ValidationRequest, raw: String) -> ValidationOutcome {
    ValidationOutcome(parse_and_normalize(&raw, request.version.as_ref()))
}

#[then("the normalised account is \"{expected}\"")]
fn normalised_account_is(outcome: &ValidationOutcome, expected: String) {
    let identifier = outcome
        .0
        .as_ref()
        .unwrap_or_else(|err| panic!("expected a valid account, got: {err}"));
    assert_eq!(identifier.normalized(), expected);
}

#[then("validation fails with \"{snippet}\"")]
fn validation_fails_with(outcome: &ValidationOutcome, snippet: String) {
    let Err(err) = &outcome.0 else {
        panic!("expected validation to fail");
    };
    let message = err.to_string();
    assert!(
        message.contains(&snippet),
        "expected error to contain '{snippet}', got: {message}"
    );
}

#[scenario(
    path = "tests/features/account.feature",
    name = "Normalise the host of a quoted account"
)]
fn scenario_normalise_quoted(request: ValidationRequest, outcome: ValidationOutcome) {
    let _ = (request, outcome);
}

#[scenario(
    path = "tests/features/account.feature",
    name = "Reject an over-long user on a legacy server"
)]
fn scenario_reject_long_user(request: ValidationRequest, outcome: ValidationOutcome) {
    let _ = (request, outcome);
}

#[scenario(
    path = "tests/features/account.feature",
    name = "Accept the same user once the limit grows"
)]
fn scenario_accept_after_limit_grows(request: ValidationRequest, outcome: ValidationOutcome) {
    let _ = (request, outcome);
}

#[scenario(
    path = "tests/features/account.feature",
    name = "Reject an unterminated quoted user"
)]
fn scenario_reject_unterminated(request: ValidationRequest, outcome: ValidationOutcome) {
    let _ = (request, outcome);
}
