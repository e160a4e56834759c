//! Behavioural scenarios for backup argument assembly.

use std::cell::RefCell;
use std::rc::Rc;

use myrig::build_args;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Clone, Debug, Default)]
struct Inputs {
    user: Option<String>,
    password: Option<String>,
    compress: bool,
    databases: Vec<String>,
    extra_args: Vec<String>,
}

/// Inputs accumulated across `Given` steps.
#[derive(Clone, Debug, Default)]
struct BackupInputs {
    inputs: Rc<RefCell<Inputs>>,
}

#[derive(Clone, Debug, Default)]
struct RenderedArgs(String);

#[fixture]
fn backup_inputs() -> BackupInputs {
    BackupInputs::default()
}

#[fixture]
fn rendered() -> RenderedArgs {
    RenderedArgs::default()
}

#[given("no backup inputs")]
fn no_backup_inputs() -> BackupInputs {
    BackupInputs::default()
}

#[given("backup credentials \"{user}\" and \"{password}\"")]
fn backup_credentials(user: String, password: String) -> BackupInputs {
    let inputs = BackupInputs::default();
    {
        let mut state = inputs.inputs.borrow_mut();
        state.user = Some(user);
        state.password = Some(password);
    }
    inputs
}

#[given("compression is enabled")]
fn compression_enabled(backup_inputs: &BackupInputs) {
    backup_inputs.inputs.borrow_mut().compress = true;
}

#[given("the databases \"{names}\" are selected")]
fn databases_selected(backup_inputs: &BackupInputs, names: String) {
    backup_inputs
        .inputs
        .borrow_mut()
        .databases
        .extend(names.split_whitespace().map(str::to_owned));
}

#[given("the extra argument \"{arg}\" is appended")]
fn extra_argument(backup_inputs: &BackupInputs, arg: String) {
    backup_inputs.inputs.borrow_mut().extra_args.push(arg);
}

#[when("I render the backup arguments")]
fn render_arguments(backup_inputs: &BackupInputs) -> RenderedArgs {
    let state = backup_inputs.inputs.borrow();
    RenderedArgs(build_args(
        state.user.as_deref(),
        state.password.as_deref(),
        state.compress,
        &state.databases,
        &state.extra_args,
    ))
}

#[then("the rendered arguments equal {expected}")]
fn rendered_arguments_equal(rendered: &RenderedArgs, expected: String) {
    assert_eq!(rendered.0, expected);
}

#[then("the rendered arguments are empty")]
fn rendered_arguments_empty(rendered: &RenderedArgs) {
    assert!(rendered.0.is_empty(), "expected no arguments, got: {}", rendered.0);
}

#[scenario(
    path = "tests/features/backup.feature",
    name = "Render every segment in fixed order"
)]
fn scenario_full_arguments(backup_inputs: BackupInputs, rendered: RenderedArgs) {
    let _ = (backup_inputs, rendered);
}

#[scenario(
    path = "tests/features/backup.feature",
    name = "Render nothing without inputs"
)]
fn scenario_empty_arguments(backup_inputs: BackupInputs, rendered: RenderedArgs) {
    let _ = (backup_inputs, rendered);
}

#[scenario(
    path = "tests/features/backup.feature",
    name = "Start with the database list when it is the only input"
)]
fn scenario_database_only(backup_inputs: BackupInputs, rendered: RenderedArgs) {
    let _ = (backup_inputs, rendered);
}
