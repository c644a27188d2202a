//! Application shell
//!
//! The shell owns one slot per route. Navigating re-initialises the target
//! route, so it always starts from a fresh generation and replies still in
//! flight for the previous instance are discarded when they land. The signup
//! route is an emitter: a submitted user surfaces as
//! [`ShellMsg::UserSubmitted`] and is appended to the shell's user list.

use crate::pages::signup::User;
use crate::pages::{clock, counter, signup};
use capsule::{Emitter, EmitterInit, EmitterMsg, Page, PageInit, PageMsg};
use capsule_core::{Cmd, Html, Program, Sub};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A top-level route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Route {
    /// Counter with a delayed increment
    Counter,
    /// Signup form reporting to the shell
    Signup,
    /// Ticking clock
    Clock,
}

impl Route {
    /// Every route, in navigation order.
    pub const ALL: [Route; 3] = [Route::Counter, Route::Signup, Route::Clock];

    /// Lower-case name used in scripts and element ids.
    pub fn name(self) -> &'static str {
        match self {
            Route::Counter => "counter",
            Route::Signup => "signup",
            Route::Clock => "clock",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::ALL
            .into_iter()
            .find(|route| route.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Shell messages.
#[derive(Debug, Clone)]
pub enum ShellMsg {
    /// Switch to a route, re-initialising it
    Navigate(Route),
    /// Message for a page slot
    Page(Route, PageMsg),
    /// Message for the signup emitter
    Signup(EmitterMsg<ShellMsg>),
    /// Emitted by the signup form
    UserSubmitted(User),
}

/// Constructors for every slot, reused on each navigation.
#[derive(Clone)]
struct Catalog {
    counter: PageInit<i64>,
    clock: PageInit<()>,
    signup: EmitterInit<(), ShellMsg>,
}

impl Catalog {
    fn new() -> Self {
        Self {
            counter: Page::element(counter::program()),
            clock: Page::element(clock::program()),
            signup: Emitter::element(signup::program(), signup::submitted, ShellMsg::UserSubmitted),
        }
    }
}

/// Shell model.
#[derive(Clone)]
pub struct Shell {
    catalog: Catalog,
    route: Route,
    pages: BTreeMap<Route, Page>,
    signup: Emitter<ShellMsg>,
    users: Vec<User>,
}

impl Shell {
    /// Route currently shown.
    pub fn route(&self) -> Route {
        self.route
    }

    /// Users registered through the signup form, in submission order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Page mounted for `route`, if it is a page slot.
    pub fn page(&self, route: Route) -> Option<&Page> {
        self.pages.get(&route)
    }

    /// The signup emitter.
    pub fn signup(&self) -> &Emitter<ShellMsg> {
        &self.signup
    }

    fn mount(&mut self, route: Route) -> Cmd<ShellMsg> {
        tracing::debug!(%route, "mounting route");
        let (page, cmd) = match route {
            Route::Signup => {
                let (signup, cmd) = self.catalog.signup.init(());
                self.signup = signup;
                return cmd.map(ShellMsg::Signup);
            }
            Route::Counter => self.catalog.counter.init(0),
            Route::Clock => self.catalog.clock.init(()),
        };
        self.pages.insert(route, page);
        cmd.map(move |msg| ShellMsg::Page(route, msg))
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("route", &self.route)
            .field("pages", &self.pages)
            .field("signup", &self.signup)
            .field("users", &self.users)
            .finish_non_exhaustive()
    }
}

/// The shell program, starting on `Route::Counter`.
pub fn program() -> Program<(), Shell, ShellMsg> {
    Program::element(|()| init(), update, view, subscriptions)
}

fn init() -> (Shell, Cmd<ShellMsg>) {
    let mut shell = Shell {
        catalog: Catalog::new(),
        route: Route::Counter,
        pages: BTreeMap::new(),
        signup: Emitter::empty(),
        users: Vec::new(),
    };
    let cmd = Cmd::batch(Route::ALL.map(|route| shell.mount(route)));
    (shell, cmd)
}

fn update(msg: ShellMsg, mut shell: Shell) -> (Shell, Cmd<ShellMsg>) {
    match msg {
        ShellMsg::Navigate(route) => {
            shell.route = route;
            let cmd = shell.mount(route);
            (shell, cmd)
        }
        ShellMsg::Page(route, msg) => {
            let Some(page) = shell.pages.get(&route) else {
                return (shell, Cmd::none());
            };
            let (page, cmd) = page.update(msg);
            shell.pages.insert(route, page);
            (shell, cmd.map(move |msg| ShellMsg::Page(route, msg)))
        }
        ShellMsg::Signup(msg) => {
            let (signup, cmd) = shell.signup.update(msg, ShellMsg::Signup);
            shell.signup = signup;
            (shell, cmd)
        }
        ShellMsg::UserSubmitted(user) => {
            tracing::info!(%user, "user registered");
            shell.users.push(user);
            (shell, Cmd::none())
        }
    }
}

fn view(shell: &Shell) -> Html<ShellMsg> {
    let nav = Html::element("nav").children(Route::ALL.into_iter().map(|route| {
        let mut link = Html::element("button")
            .id(format!("nav-{route}"))
            .on_click(ShellMsg::Navigate(route))
            .child(Html::text(route.name()));
        if route == shell.route {
            link = link.attr("class", "active");
        }
        Html::from(link)
    }));

    let content = match shell.route {
        Route::Signup => shell.signup.view(ShellMsg::Signup),
        route => shell
            .pages
            .get(&route)
            .map(|page| page.view(move |msg| ShellMsg::Page(route, msg)))
            .unwrap_or_else(Html::empty),
    };

    let users = Html::element("ul").id("users").children(
        shell
            .users
            .iter()
            .map(|user| Html::from(Html::element("li").child(Html::text(user.to_string())))),
    );

    Html::element("div")
        .id("shell")
        .child(nav)
        .child(Html::element("section").child(content))
        .child(users)
        .into()
}

/// Only the visible route listens to anything.
fn subscriptions(shell: &Shell) -> Sub<ShellMsg> {
    match shell.route {
        Route::Signup => shell.signup.subscriptions(ShellMsg::Signup),
        route => shell
            .pages
            .get(&route)
            .map(|page| page.subscriptions(move |msg| ShellMsg::Page(route, msg)))
            .unwrap_or_default(),
    }
}
