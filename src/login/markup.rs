use maud::{Markup, Render, html};

use crate::disclosure::model::VisibilityState;
use crate::markup::page_link;
use crate::provider::markup::{LastUsedBadge, List};
use crate::provider::model::{Catalog, FormErrors, LastUsed};

use super::model::Prompts;

const PASSWORD_TOGGLE_SCRIPT: &str = r"on click
    halt the event
    remove .hidden from #password-panel
    add .hidden to me
    call #username.focus()";

pub struct LoginPage<'a> {
    pub catalog: &'a Catalog,
    pub state: VisibilityState,
    pub last_used: Option<&'a LastUsed>,
    pub prompts: &'a Prompts,
    pub form_errors: &'a FormErrors,
    pub next: &'a str,
    pub identifier: Option<&'a str>,
    pub password_error: Option<&'a str>,
}

impl Render for LoginPage<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="p-8" {
                header class="text-center mb-6" {
                    h2 class="text-2xl font-bold" { (self.prompts.providers) }
                }

                (List {
                    catalog: self.catalog,
                    state: &self.state,
                    last_used: self.last_used,
                    form_errors: self.form_errors,
                    next: self.next,
                })

                (PasswordPanel {
                    expanded: self.state.password_expanded(),
                    remembered: self.last_used.is_some_and(LastUsed::is_password),
                    prompt: &self.prompts.password,
                    next: self.next,
                    identifier: self.identifier,
                    error: self.password_error,
                    toggle_href: page_link(
                        self.next,
                        self.catalog.has_secondary() && !self.state.more_shown(),
                        Some(("method", LastUsed::PASSWORD)),
                    ),
                })
            }
        }
    }
}

struct PasswordPanel<'a> {
    expanded: bool,
    remembered: bool,
    prompt: &'a str,
    next: &'a str,
    identifier: Option<&'a str>,
    error: Option<&'a str>,
    toggle_href: String,
}

impl Render for PasswordPanel<'_> {
    fn render(&self) -> Markup {
        html! {
            section class="mt-8 border-t border-gray-200 pt-6" {
                @if !self.expanded {
                    a #password-toggle
                        ."block text-center text-sm text-blue-600 hover:underline"
                        href=(self.toggle_href)
                        _=(PASSWORD_TOGGLE_SCRIPT)
                    {
                        (self.prompt)
                    }
                }
                div #password-panel ."mt-2" .hidden[!self.expanded] {
                    header class="flex items-center justify-center mb-4" {
                        h3 class="text-xl" { (self.prompt) }
                        @if self.remembered { (LastUsedBadge) }
                    }
                    form #password-form
                        method="post"
                        action="/login/password"
                        hx-post="/login/password"
                        hx-target="#password-error"
                        hx-swap="innerHTML"
                        hx-disabled-elt="find button[type='submit']"
                    {
                        input type="hidden" name="next" value=(self.next) {}
                        input type="hidden" name="_charset_" {}

                        div class="mb-4" {
                            label for="username" class="block mb-1 text-sm font-medium" {
                                "Username or email"
                            }
                            input #username
                                ."w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none"
                                type="text"
                                name="username"
                                required
                                value=[self.identifier] {}
                        }
                        div class="mb-4" {
                            label for="password" class="block mb-1 text-sm font-medium" {
                                "Password"
                            }
                            input #password
                                ."w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none"
                                type="password"
                                name="password"
                                required {}
                        }

                        div #password-error ."mb-2" {
                            @if let Some(error) = self.error {
                                (failure_text(error))
                            }
                        }

                        button type="submit"
                            class="w-full px-4 py-2 text-white bg-blue-700 hover:bg-blue-800 font-medium rounded-md" {
                            "Sign in"
                        }
                    }
                }
            }
        }
    }
}

/// The error-region fragment swapped in place of `#password-error`'s
/// contents, leaving every entered field untouched.
pub fn failure_notice(e: &super::Error) -> Markup {
    failure_text(e.user_message())
}

fn failure_text(message: &str) -> Markup {
    html! {
        p class="text-sm text-red-600" role="alert" { (message) }
    }
}
