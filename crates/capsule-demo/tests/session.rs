//! End-to-end scripted sessions

use capsule_core::RuntimeConfig;
use capsule_demo::pages::signup::User;
use capsule_demo::{script, Route, Session};

fn run(text: &str) -> Session {
    let mut session = Session::start(RuntimeConfig::default()).unwrap();
    for step in script::parse(text).unwrap() {
        session.apply(&step).unwrap();
    }
    session
}

#[test]
fn default_script_registers_al_once() {
    let session = run(capsule_demo::DEFAULT_SCRIPT);
    assert_eq!(session.shell().route(), Route::Clock);
    assert_eq!(
        session.shell().users(),
        [User {
            name: "Al".into(),
            age: 30
        }]
    );
    assert!(session.render().contains("2s on this page"));
}

#[test]
fn delayed_increment_lands_when_the_page_stays() {
    let session = run("click:later wait:1500");
    assert!(session.render().contains("<output>1</output>"));
}

#[test]
fn delayed_increment_is_dropped_after_remount() {
    let session = run("click:inc click:later wait:500 nav:counter wait:1500");
    assert!(session.render().contains("<output>0</output>"));
}

#[test]
fn two_submissions_register_two_users() {
    let session = run(
        "nav:signup input:name=Al input:age=30 click:submit \
         input:name=Bo input:age=41 click:submit wait:5000",
    );
    let names: Vec<&str> = session
        .shell()
        .users()
        .iter()
        .map(|user| user.name.as_str())
        .collect();
    assert_eq!(names, ["Al", "Bo"]);
}

#[test]
fn empty_name_cannot_submit() {
    let mut session = run("nav:signup");
    let step = script::Step::Click("submit".into());
    let err = session.apply(&step).unwrap_err();
    assert_eq!(err.code(), "RUNTIME_TARGET_NOT_FOUND");
    assert!(session.shell().users().is_empty());
}

#[test]
fn tight_budget_still_handles_the_default_script() {
    let config = RuntimeConfig::from_toml_str("max_steps_per_drain = 4").unwrap();
    let mut session = Session::start(config).unwrap();
    for step in script::parse(capsule_demo::DEFAULT_SCRIPT).unwrap() {
        session.apply(&step).unwrap();
    }
    assert_eq!(session.shell().users().len(), 1);
}
