//! Signup form
//!
//! Submitting clears the fields so the next user can be typed in straight
//! away. Mounted as an emitter, the submitted user is routed to the shell.

use capsule_core::{Cmd, Html, Program, Sub};
use std::fmt;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.age)
    }
}

/// Raw form fields.
#[derive(Debug, Clone, Default)]
pub struct Form {
    name: String,
    age: String,
}

/// Form messages.
#[derive(Debug, Clone)]
pub enum Msg {
    /// Name field changed
    Name(String),
    /// Age field changed
    Age(String),
    /// Register the user
    Submit(User),
}

/// Router picking the submitted user out of the form's messages.
pub fn submitted(msg: &Msg) -> Option<User> {
    match msg {
        Msg::Submit(user) => Some(user.clone()),
        _ => None,
    }
}

/// Empty signup form.
pub fn program() -> Program<(), Form, Msg> {
    Program::element(
        |()| (Form::default(), Cmd::none()),
        |msg, form| match msg {
            Msg::Name(name) => (Form { name, ..form }, Cmd::none()),
            Msg::Age(age) => (Form { age, ..form }, Cmd::none()),
            Msg::Submit(_) => (Form::default(), Cmd::none()),
        },
        view,
        |_| Sub::none(),
    )
}

fn view(form: &Form) -> Html<Msg> {
    let user = User {
        name: form.name.trim().to_string(),
        age: form.age.trim().parse().unwrap_or(0),
    };
    let mut submit = Html::element("button").id("submit").child(Html::text("Sign up"));
    if !user.name.is_empty() {
        submit = submit.on_click(Msg::Submit(user));
    }
    Html::element("form")
        .child(
            Html::element("input")
                .id("name")
                .attr("placeholder", "name")
                .attr("value", form.name.clone())
                .on_input(Msg::Name),
        )
        .child(
            Html::element("input")
                .id("age")
                .attr("placeholder", "age")
                .attr("value", form.age.clone())
                .on_input(Msg::Age),
        )
        .child(submit)
        .into()
}
