//! Emitters reporting to a parent running in the host loop

use assert_matches::assert_matches;
use capsule::{Emitter, EmitterInit, EmitterMsg};
use capsule_core::{Html, Program, Runtime, RuntimeConfig, RuntimeError};
use capsule_testkit::fixtures::signup::{self, FormMsg, User};
use capsule_testkit::{assert_absorbed, click, input};
use std::time::Duration;

#[derive(Clone)]
struct Registry {
    form: Emitter<RegistryMsg>,
    init: EmitterInit<(), RegistryMsg>,
    users: Vec<User>,
}

#[derive(Debug)]
enum RegistryMsg {
    Form(EmitterMsg<RegistryMsg>),
    UserSubmitted(User),
    Reset,
}

fn signup_emitter() -> EmitterInit<(), RegistryMsg> {
    Emitter::element(signup::program(), signup::submitted, RegistryMsg::UserSubmitted)
}

fn registry() -> Program<(), Registry, RegistryMsg> {
    Program::element(
        |()| {
            let init = signup_emitter();
            let (form, cmd) = init.init(());
            let registry = Registry {
                form,
                init,
                users: Vec::new(),
            };
            (registry, cmd.map(RegistryMsg::Form))
        },
        |msg, mut registry| match msg {
            RegistryMsg::Form(msg) => {
                let (form, cmd) = registry.form.update(msg, RegistryMsg::Form);
                registry.form = form;
                (registry, cmd)
            }
            RegistryMsg::UserSubmitted(user) => {
                registry.users.push(user);
                (registry, capsule_core::Cmd::none())
            }
            RegistryMsg::Reset => {
                let (form, cmd) = registry.init.init(());
                registry.form = form;
                (registry, cmd.map(RegistryMsg::Form))
            }
        },
        |registry| {
            Html::element("main")
                .child(registry.form.view(RegistryMsg::Form))
                .child(Html::text(format!("{} users", registry.users.len())))
                .into()
        },
        |registry| registry.form.subscriptions(RegistryMsg::Form),
    )
}

fn al() -> User {
    User {
        name: "Al".into(),
        age: 30,
    }
}

#[test]
fn submit_emits_the_user_exactly_once() {
    let mut runtime = Runtime::start(registry(), (), RuntimeConfig::default());
    runtime.input(signup::NAME, "Al").unwrap();
    runtime.input(signup::AGE, "30").unwrap();

    let steps = runtime.click(signup::SUBMIT).unwrap();
    assert_eq!(steps, 2, "form step plus the delivered emission");
    assert_eq!(runtime.model().users, vec![al()]);
    assert!(runtime.is_idle());

    // Nothing left behind that could submit again.
    assert_eq!(runtime.advance(Duration::from_secs(5)).unwrap(), 0);
    assert_eq!(runtime.model().users, vec![al()]);
}

#[test]
fn emission_arrives_on_the_next_tick() {
    let mut runtime = Runtime::start(registry(), (), RuntimeConfig::default());
    let submit = click(&runtime.view(), signup::SUBMIT);
    runtime.enqueue(submit);
    runtime.enqueue(RegistryMsg::Reset);
    runtime.run_until_idle().unwrap();

    // Reset was queued before the emission, so it ran first.
    assert_eq!(runtime.processed(), 3);
    assert_eq!(runtime.model().users.len(), 1);
}

#[test]
fn bare_form_resubmits_until_the_budget() {
    let config = RuntimeConfig::default().with_max_steps_per_drain(50);
    let mut runtime = Runtime::start(signup::program(), (), config);
    let err = runtime.click(signup::SUBMIT).unwrap_err();
    assert_matches!(err, RuntimeError::StepBudgetExceeded { limit: 50 });
    assert!(!runtime.is_idle());
}

#[test]
fn emission_survives_a_reset() {
    let mut runtime = Runtime::start(registry(), (), RuntimeConfig::default());
    runtime.input(signup::NAME, "Al").unwrap();
    runtime.input(signup::AGE, "30").unwrap();
    let stale_submit = click(&runtime.view(), signup::SUBMIT);

    runtime.send(RegistryMsg::Reset).unwrap();
    let fresh = runtime.model().form.clone();
    runtime.send(stale_submit).unwrap();

    assert!(runtime.model().form.ptr_eq(&fresh));
    assert_eq!(runtime.model().users, vec![al()]);
}

#[test]
fn stale_edit_is_ignored_after_reset() {
    let mut runtime = Runtime::start(registry(), (), RuntimeConfig::default());
    let stale_edit = input(&runtime.view(), signup::NAME, "late");
    runtime.send(RegistryMsg::Reset).unwrap();
    let fresh = runtime.model().form.clone();

    runtime.send(stale_edit).unwrap();
    assert!(runtime.model().form.ptr_eq(&fresh));
    assert!(runtime.model().users.is_empty());
}

#[test]
fn step_reports_emission_without_scheduling_it() {
    let (form, _) = signup_emitter().init(());
    let form = form
        .step(input(&form.view(|m| m), signup::NAME, "Al"))
        .emitter;
    let form = form
        .step(input(&form.view(|m| m), signup::AGE, "30"))
        .emitter;

    let step = form.step(click(&form.view(|m| m), signup::SUBMIT));
    assert_matches!(step.emitted, Some(RegistryMsg::UserSubmitted(ref user)) if *user == al());
    assert!(step.cmd.is_none());
    assert_eq!(step.emitter.generation(), form.generation());
}

#[test]
fn emitter_for_empty_slot_drops_foreign_messages() {
    let (form, _) = signup_emitter().init(());
    let edit = input(&form.view(|m| m), signup::NAME, "x");
    let empty: Emitter<RegistryMsg> = Emitter::empty();
    let (after, cmd) = empty.update(edit, RegistryMsg::Form);
    assert_absorbed!(empty, after, cmd);
}

#[test]
fn router_sees_raw_child_messages() {
    let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let log = std::rc::Rc::clone(&seen);
    let init: EmitterInit<(), RegistryMsg> = Emitter::element(
        signup::program(),
        move |msg: &FormMsg| {
            log.borrow_mut().push(msg.clone());
            None::<User>
        },
        RegistryMsg::UserSubmitted,
    );
    let (form, _) = init.init(());
    let _ = form.step(input(&form.view(|m| m), signup::NAME, "Bo"));
    assert_eq!(*seen.borrow(), vec![FormMsg::Name("Bo".into())]);
}
