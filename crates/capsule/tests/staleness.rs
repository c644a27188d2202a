//! Stale replies addressed to a re-initialised slot

use capsule::{Page, PageInit, PageMsg};
use capsule_core::{Cmd, Html, Program, Runtime, RuntimeConfig, Sub};
use capsule_testkit::fixtures::{counter, loader};
use capsule_testkit::{assert_absorbed, assert_text, only_timer};
use futures::channel::oneshot;
use futures::executor::block_on;
use std::time::Duration;

#[derive(Clone)]
struct Shell {
    slot: Page,
    init: PageInit<i64>,
}

#[derive(Debug, Clone)]
enum ShellMsg {
    Slot(PageMsg),
    Restart(i64),
}

fn shell() -> Program<i64, Shell, ShellMsg> {
    let init = Page::element(counter::program());
    Program::element(
        move |start| {
            let (slot, cmd) = init.init(start);
            let shell = Shell {
                slot,
                init: init.clone(),
            };
            (shell, cmd.map(ShellMsg::Slot))
        },
        |msg, shell| match msg {
            ShellMsg::Slot(msg) => {
                let (slot, cmd) = shell.slot.update(msg);
                (Shell { slot, ..shell }, cmd.map(ShellMsg::Slot))
            }
            ShellMsg::Restart(start) => {
                let (slot, cmd) = shell.init.init(start);
                (Shell { slot, ..shell }, cmd.map(ShellMsg::Slot))
            }
        },
        |shell| {
            Html::element("main")
                .child(shell.slot.view(ShellMsg::Slot))
                .into()
        },
        |shell| shell.slot.subscriptions(ShellMsg::Slot),
    )
}

#[test]
fn delayed_reply_reaches_the_same_instance() {
    let mut runtime = Runtime::start(shell(), 0, RuntimeConfig::default());
    runtime.click(counter::LATER).unwrap();
    assert_eq!(runtime.pending_timers(), 1);

    runtime.advance(counter::LATER_DELAY).unwrap();
    assert_text!(runtime.view(), "1");
}

#[test]
fn delayed_reply_after_restart_is_discarded() {
    let mut runtime = Runtime::start(shell(), 0, RuntimeConfig::default());
    runtime.click(counter::LATER).unwrap();
    runtime.send(ShellMsg::Restart(10)).unwrap();
    let restarted = runtime.model().slot.clone();

    let steps = runtime.advance(counter::LATER_DELAY).unwrap();
    assert_eq!(steps, 1, "the timer message is still dispatched to the shell");
    assert_eq!(runtime.pending_timers(), 0);
    assert!(runtime.model().slot.ptr_eq(&restarted));
    assert_text!(runtime.view(), "10");
}

#[test]
fn restart_before_and_after_the_timer() {
    let mut runtime = Runtime::start(shell(), 0, RuntimeConfig::default());
    runtime.click(counter::LATER).unwrap();
    runtime.advance(Duration::from_millis(400)).unwrap();
    runtime.send(ShellMsg::Restart(5)).unwrap();
    runtime.click(counter::LATER).unwrap();

    // Old timer fires at 1000ms, the new one at 1400ms.
    runtime.advance(Duration::from_millis(700)).unwrap();
    assert_text!(runtime.view(), "5");
    runtime.advance(Duration::from_millis(300)).unwrap();
    assert_text!(runtime.view(), "6");
}

#[test]
fn direct_timer_message_from_old_generation() {
    let init = Page::element(counter::program());
    let (first, _) = init.init(0);
    let (_, cmd) = first.update(capsule_testkit::click(&first.view(|m| m), counter::LATER));
    let late = only_timer(cmd);

    let (second, _) = init.init(0);
    let (after, cmd) = second.update(late);
    assert_absorbed!(second, after, cmd);
}

#[test]
fn network_reply_for_replaced_loader_is_discarded() {
    let init = Page::element(loader::program());

    let (old_tx, old_rx) = loader::request();
    let (_old, old_cmd) = init.init(old_rx);
    let (new_tx, new_rx) = loader::request();
    let (current, new_cmd) = init.init(new_rx);
    assert_text!(current.view(|m| m), "loading");

    old_tx.send("old body".to_string()).unwrap();
    new_tx.send("new body".to_string()).unwrap();

    let late = block_on(perform_output(old_cmd));
    let (after, cmd) = current.update(late);
    assert_absorbed!(current, after, cmd);

    let reply = block_on(perform_output(new_cmd));
    let (loaded, _) = after.update(reply);
    assert_text!(loaded.view(|m| m), "new body");
}

#[test]
fn loader_runs_inside_the_host_loop() {
    let (tx, rx) = loader::request();
    let page_program = Program::element(
        |reply: oneshot::Receiver<String>| Page::element(loader::program()).init(reply),
        |msg, page: Page| page.update(msg),
        |page: &Page| page.view(|m| m),
        |_| Sub::none(),
    );
    let mut runtime = Runtime::start(page_program, rx, RuntimeConfig::default());
    assert_eq!(runtime.run_until_idle().unwrap(), 0);
    assert_text!(runtime.view(), "loading");

    drop(tx);
    assert_eq!(runtime.run_until_idle().unwrap(), 1);
    assert_text!(runtime.view(), "failed");
}

async fn perform_output(cmd: Cmd<PageMsg>) -> PageMsg {
    match cmd.into_actions().pop() {
        Some(capsule_core::Action::Perform(task)) => task.await,
        other => panic!("expected a task, got {other:?}"),
    }
}
