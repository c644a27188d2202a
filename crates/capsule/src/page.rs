//! Pages
//!
//! A [`Page`] is an opaque handle to a child program whose model and message
//! types are hidden from the parent. Parents store pages in their own model,
//! route [`PageMsg`]s back through [`Page::update`], and render with
//! [`Page::view`] / [`Page::subscriptions`].
//!
//! Every [`Constructor::init`] call starts a new generation. A message that
//! was produced under a different generation, for example a timer reply
//! scheduled by a page that has since been re-initialised, is absorbed: the
//! handle comes back unchanged and the command is [`Cmd::none`].

use crate::constructor::Constructor;
use crate::lineage::{Envelope, Lineage, Router, Wiring};
use capsule_core::{Cmd, Generation, Html, Program, Sub};
use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;

/// Constructor producing [`Page`]s.
pub type PageInit<F> = Constructor<F, Page, PageMsg>;

/// Opaque handle to a child program.
#[derive(Clone)]
pub struct Page {
    lineage: Rc<Lineage<Infallible>>,
}

/// Opaque message addressed to a [`Page`].
#[derive(Clone)]
pub struct PageMsg {
    envelope: Envelope<Infallible>,
}

impl PageMsg {
    fn wrap(envelope: Envelope<Infallible>) -> Self {
        Self { envelope }
    }

    /// Generation of the page that produced this message.
    pub fn generation(&self) -> Generation {
        self.envelope.generation()
    }
}

impl fmt::Debug for PageMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageMsg")
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Wrap a program with effects and subscriptions.
    pub fn element<F, M, Msg>(program: Program<F, M, Msg>) -> PageInit<F>
    where
        F: 'static,
        M: Clone + 'static,
        Msg: Clone + 'static,
    {
        let silent: Router<Msg, Infallible> = Rc::new(|_: &Msg| None);
        let wiring = Wiring::new(program, silent);
        Constructor::new(move |flags| {
            let (lineage, cmd) = wiring.init(flags);
            (Page { lineage }, cmd.map(PageMsg::wrap))
        })
    }

    /// Wrap a pure program: no commands, no subscriptions, no flags.
    pub fn sandbox<M, Msg>(
        model: M,
        update: impl Fn(Msg, M) -> M + 'static,
        view: impl Fn(&M) -> Html<Msg> + 'static,
    ) -> PageInit<()>
    where
        M: Clone + 'static,
        Msg: Clone + 'static,
    {
        Self::element(Program::sandbox(model, update, view))
    }

    /// Placeholder page: blank view, no subscriptions, accepts no message.
    pub fn empty() -> Self {
        Self {
            lineage: Lineage::empty(),
        }
    }

    /// Deliver a message.
    ///
    /// Messages from this page's generation update the child and return the
    /// new page with the child's command. Messages from any other generation
    /// return this very page (see [`Page::ptr_eq`]) and [`Cmd::none`].
    pub fn update(&self, msg: PageMsg) -> (Page, Cmd<PageMsg>) {
        let transition = self.lineage.step(&msg.envelope);
        (
            Page {
                lineage: transition.lineage,
            },
            transition.cmd.map(PageMsg::wrap),
        )
    }

    /// Render, re-targeting messages with `wrap`.
    pub fn view<P: 'static>(&self, wrap: impl Fn(PageMsg) -> P + 'static) -> Html<P> {
        self.lineage
            .view()
            .map(move |envelope| wrap(PageMsg::wrap(envelope)))
    }

    /// Current subscriptions, re-targeting messages with `wrap`.
    pub fn subscriptions<P: 'static>(&self, wrap: impl Fn(PageMsg) -> P + 'static) -> Sub<P> {
        self.lineage
            .subscriptions()
            .map(move |envelope| wrap(PageMsg::wrap(envelope)))
    }

    /// Generation of the initialisation episode this page belongs to.
    pub fn generation(&self) -> Generation {
        self.lineage.generation()
    }

    /// Whether `msg` would be applied rather than discarded.
    pub fn accepts(&self, msg: &PageMsg) -> bool {
        msg.generation() == self.generation()
    }

    /// Whether both handles are the same value.
    pub fn ptr_eq(&self, other: &Page) -> bool {
        Rc::ptr_eq(&self.lineage, &other.lineage)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capsule_core::Action;
    use std::time::Duration;

    #[derive(Debug, Clone)]
    enum Msg {
        Increment,
        Decrement,
        IncrementLater,
    }

    fn counter() -> Program<i32, i32, Msg> {
        Program::element(
            |start: i32| (start, Cmd::none()),
            |msg: Msg, count: i32| match msg {
                Msg::Increment => (count + 1, Cmd::none()),
                Msg::Decrement => (count - 1, Cmd::none()),
                Msg::IncrementLater => (
                    count,
                    Cmd::after(Duration::from_millis(10), Msg::Increment),
                ),
            },
            |count: &i32| {
                Html::element("div")
                    .child(Html::element("button").id("inc").on_click(Msg::Increment))
                    .child(Html::element("button").id("dec").on_click(Msg::Decrement))
                    .child(Html::element("button").id("later").on_click(Msg::IncrementLater))
                    .child(Html::element("span").child(Html::text(count.to_string())))
                    .into()
            },
            |_| Sub::none(),
        )
    }

    fn click(page: &Page, id: &str) -> PageMsg {
        page.view(|msg| msg).trigger(id, "click", "").unwrap()
    }

    fn timer_message(cmd: Cmd<PageMsg>) -> PageMsg {
        match cmd.into_actions().pop() {
            Some(Action::After { msg, .. }) => msg,
            other => panic!("expected a timer, got {other:?}"),
        }
    }

    #[test]
    fn three_increments_show_three() {
        let (mut page, cmd) = Page::element(counter()).init(0);
        assert!(cmd.is_none());
        for _ in 0..3 {
            let msg = click(&page, "inc");
            page = page.update(msg).0;
        }
        assert_eq!(page.view(|msg| msg).text_content(), "3");
    }

    #[test]
    fn current_messages_keep_generation() {
        let (page, _) = Page::element(counter()).init(5);
        let msg = click(&page, "dec");
        assert!(page.accepts(&msg));
        let (next, _) = page.update(msg);
        assert_eq!(next.generation(), page.generation());
        assert!(!next.ptr_eq(&page));
        assert_eq!(next.view(|msg| msg).text_content(), "4");
    }

    #[test]
    fn message_from_previous_generation_is_absorbed() {
        let init = Page::element(counter());
        let (first, _) = init.init(0);
        let (_, cmd) = first.update(click(&first, "later"));
        let late = timer_message(cmd);

        let (second, _) = init.init(0);
        assert_ne!(first.generation(), second.generation());
        assert!(!second.accepts(&late));

        let (after, cmd) = second.update(late);
        assert!(after.ptr_eq(&second));
        assert!(cmd.is_none());
        assert_eq!(after.view(|msg| msg).text_content(), "0");
    }

    #[test]
    fn stale_delivery_is_idempotent() {
        let init = Page::element(counter());
        let (old, _) = init.init(0);
        let stale = click(&old, "inc");
        let (current, _) = init.init(10);

        let mut page = current.clone();
        for _ in 0..4 {
            let (next, cmd) = page.update(stale.clone());
            assert!(next.ptr_eq(&current));
            assert!(cmd.is_none());
            page = next;
        }
    }

    #[test]
    fn empty_page_accepts_nothing() {
        let empty = Page::empty();
        assert!(empty.view(|msg| msg).is_empty());
        assert!(empty.subscriptions(|msg| msg).is_empty());

        let (other, _) = Page::element(counter()).init(0);
        let msg = click(&other, "inc");
        let (after, cmd) = empty.update(msg);
        assert!(after.ptr_eq(&empty));
        assert!(cmd.is_none());
    }

    #[test]
    fn sandbox_pages_have_no_effects() {
        let (page, cmd) = Page::sandbox(
            String::from("a"),
            |suffix: String, text| text + &suffix,
            |text: &String| {
                Html::element("p")
                    .id("grow")
                    .on_click("b".to_string())
                    .child(Html::text(text.clone()))
                    .into()
            },
        )
        .init(());
        assert!(cmd.is_none());

        let msg = page.view(|msg| msg).trigger("grow", "click", "").unwrap();
        let (page, cmd) = page.update(msg);
        assert!(cmd.is_none());
        assert_eq!(page.view(|msg| msg).text_content(), "ab");
    }

    #[test]
    fn view_wrap_nests() {
        #[derive(Debug)]
        enum Parent {
            Child(PageMsg),
        }

        let (page, _) = Page::element(counter()).init(1);
        let view = page.view(Parent::Child);
        let Parent::Child(msg) = view.trigger("inc", "click", "").unwrap();
        assert_eq!(page.update(msg).0.view(|msg| msg).text_content(), "2");
    }
}
