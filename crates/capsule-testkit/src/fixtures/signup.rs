//! Signup form whose submit message re-issues itself
//!
//! Submitting answers `Submit(user)` with `Cmd::deliver(Submit(user))`. Run
//! bare, the form therefore keeps submitting forever; wrapped in an emitter
//! that routes `Submit`, the routed step drops that command and the user is
//! emitted exactly once.

use capsule_core::{Cmd, Html, Program, Sub};

/// Id of the name input.
pub const NAME: &str = "name";
/// Id of the age input.
pub const AGE: &str = "age";
/// Id of the submit button.
pub const SUBMIT: &str = "submit";

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct User {
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
}

/// Form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    /// Raw name field
    pub name: String,
    /// Raw age field
    pub age: String,
}

impl Form {
    /// The user this form currently describes. Unparsable ages count as zero.
    pub fn user(&self) -> User {
        User {
            name: self.name.trim().to_string(),
            age: self.age.trim().parse().unwrap_or(0),
        }
    }
}

/// Form messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMsg {
    /// Name field changed
    Name(String),
    /// Age field changed
    Age(String),
    /// Submit the given user
    Submit(User),
}

/// Router selecting submitted users.
pub fn submitted(msg: &FormMsg) -> Option<User> {
    match msg {
        FormMsg::Submit(user) => Some(user.clone()),
        _ => None,
    }
}

/// Empty signup form.
pub fn program() -> Program<(), Form, FormMsg> {
    Program::element(
        |()| (Form::default(), Cmd::none()),
        |msg, form| match msg {
            FormMsg::Name(name) => (Form { name, ..form }, Cmd::none()),
            FormMsg::Age(age) => (Form { age, ..form }, Cmd::none()),
            FormMsg::Submit(user) => (form, Cmd::deliver(FormMsg::Submit(user))),
        },
        view,
        |_| Sub::none(),
    )
}

fn view(form: &Form) -> Html<FormMsg> {
    Html::element("form")
        .child(
            Html::element("input")
                .id(NAME)
                .attr("value", form.name.clone())
                .on_input(FormMsg::Name),
        )
        .child(
            Html::element("input")
                .id(AGE)
                .attr("value", form.age.clone())
                .on_input(FormMsg::Age),
        )
        .child(
            Html::element("button")
                .id(SUBMIT)
                .on_click(FormMsg::Submit(form.user()))
                .child(Html::text("Sign up")),
        )
        .into()
}
