//! Heterogeneous children in one collection, and pages inside pages

use capsule::{Page, PageMsg};
use capsule_core::{Cmd, Html, Program, Runtime, RuntimeConfig, Sub};
use capsule_testkit::fixtures::{clock, counter, signup};
use capsule_testkit::{assert_absorbed, assert_text, click};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Clone)]
struct Dashboard {
    pages: BTreeMap<&'static str, Page>,
}

#[derive(Debug, Clone)]
enum DashMsg {
    Child(&'static str, PageMsg),
}

fn dashboard() -> Program<(), Dashboard, DashMsg> {
    Program::element(
        |()| {
            let (counter, counter_cmd) = Page::element(counter::program()).init(3);
            let (clock, clock_cmd) =
                Page::element(clock::program()).init(Duration::from_millis(100));
            let (form, form_cmd) = Page::element(signup::program()).init(());
            let cmd = Cmd::batch([
                counter_cmd.map(|m| DashMsg::Child("counter", m)),
                clock_cmd.map(|m| DashMsg::Child("clock", m)),
                form_cmd.map(|m| DashMsg::Child("form", m)),
            ]);
            let pages = BTreeMap::from([("clock", clock), ("counter", counter), ("form", form)]);
            (Dashboard { pages }, cmd)
        },
        |DashMsg::Child(key, msg), mut dashboard| {
            let Some(page) = dashboard.pages.get(key) else {
                return (dashboard, Cmd::none());
            };
            let (page, cmd) = page.update(msg);
            dashboard.pages.insert(key, page);
            (dashboard, cmd.map(move |m| DashMsg::Child(key, m)))
        },
        |dashboard| {
            Html::element("main")
                .children(
                    dashboard
                        .pages
                        .iter()
                        .map(|(&key, page)| page.view(move |m| DashMsg::Child(key, m))),
                )
                .into()
        },
        |dashboard| {
            Sub::batch(
                dashboard
                    .pages
                    .iter()
                    .map(|(&key, page)| page.subscriptions(move |m| DashMsg::Child(key, m))),
            )
        },
    )
}

fn text(runtime: &Runtime<(), Dashboard, DashMsg>, key: &str) -> String {
    runtime.model().pages[key].view(|m| m).text_content()
}

#[test]
fn children_update_independently() {
    let mut runtime = Runtime::start(dashboard(), (), RuntimeConfig::default());
    runtime.click(counter::INC).unwrap();
    runtime.advance(Duration::from_millis(350)).unwrap();

    assert_eq!(text(&runtime, "counter"), "4");
    assert_eq!(text(&runtime, "clock"), "3pause");
    assert_eq!(runtime.subscriptions().len(), 1);
}

#[test]
fn paused_child_drops_its_subscription() {
    let mut runtime = Runtime::start(dashboard(), (), RuntimeConfig::default());
    runtime.click(clock::TOGGLE).unwrap();
    assert!(runtime.subscriptions().is_empty());

    runtime.advance(Duration::from_secs(1)).unwrap();
    assert_eq!(text(&runtime, "clock"), "0resume");
}

#[test]
fn message_routed_to_a_sibling_is_rejected() {
    let mut runtime = Runtime::start(dashboard(), (), RuntimeConfig::default());
    let DashMsg::Child(_, inc) = click(&runtime.view(), counter::INC);
    let clock_before = runtime.model().pages["clock"].clone();

    runtime.send(DashMsg::Child("clock", inc)).unwrap();
    assert!(runtime.model().pages["clock"].ptr_eq(&clock_before));
    assert_eq!(text(&runtime, "counter"), "3");
}

#[test]
fn generations_are_distinct_across_children() {
    let runtime = Runtime::start(dashboard(), (), RuntimeConfig::default());
    let pages = &runtime.model().pages;
    assert_ne!(pages["clock"].generation(), pages["counter"].generation());
    assert_ne!(pages["counter"].generation(), pages["form"].generation());
}

/// A program whose whole model is another page.
fn frame() -> Program<i64, Page, PageMsg> {
    Program::element(
        |start| Page::element(counter::program()).init(start),
        |msg, inner: Page| inner.update(msg),
        |inner: &Page| {
            Html::element("section")
                .child(inner.view(|m| m))
                .into()
        },
        |inner: &Page| inner.subscriptions(|m| m),
    )
}

#[test]
fn pages_nest() {
    let (outer, _) = Page::element(frame()).init(7);
    let msg = click(&outer.view(|m| m), counter::INC);
    assert!(outer.accepts(&msg));

    let (outer, cmd) = outer.update(msg);
    assert!(cmd.is_none());
    assert_text!(outer.view(|m| m), "8");
}

#[test]
fn nested_timer_reply_is_absorbed_after_outer_restart() {
    let init = Page::element(frame());
    let (first, _) = init.init(0);
    let (_, cmd) = first.update(click(&first.view(|m| m), counter::LATER));
    let late = capsule_testkit::only_timer(cmd);

    let (second, _) = init.init(0);
    let (after, cmd) = second.update(late);
    assert_absorbed!(second, after, cmd);
}

#[test]
fn sandboxed_child_drops_its_delayed_increment() {
    let (mut page, cmd) = Page::element(counter::sandbox()).init(());
    assert!(cmd.is_none());

    for id in [counter::INC, counter::INC, counter::LATER] {
        let (next, cmd) = page.update(click(&page.view(|m| m), id));
        assert!(cmd.is_none());
        page = next;
    }
    assert_text!(page.view(|m| m), "2");
}
