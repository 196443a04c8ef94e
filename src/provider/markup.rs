use maud::{Markup, Render, html};

use crate::disclosure::model::VisibilityState;
use crate::markup::{IdExt, page_link};

use super::Id;
use super::model::{Catalog, FormErrors, InlineForm, LastUsed, Provider};

impl IdExt for Id {
    fn attr(&self) -> String {
        format!("provider-{self}")
    }

    fn target(&self) -> String {
        format!("#provider-{self}")
    }
}

fn form_id(id: &Id) -> String {
    format!("form-{id}")
}

fn form_target(id: &Id) -> String {
    format!("#form-{id}")
}

fn field_id(id: &Id) -> String {
    format!("form-{id}-field")
}

fn field_target(id: &Id) -> String {
    format!("#form-{id}-field")
}

const BUTTON_CLASS: &str =
    "flex items-center gap-3 w-full px-4 py-2 border border-gray-300 rounded-md hover:bg-gray-100";

const SHOW_MORE_SCRIPT: &str = r"on click
    halt the event
    remove .hidden from .provider-secondary
    add .hidden to me";

pub struct LastUsedBadge;

impl Render for LastUsedBadge {
    fn render(&self) -> Markup {
        html! {
            span class="ml-2 px-2 py-0.5 text-xs rounded-full bg-blue-100 text-blue-800" { "Last used" }
        }
    }
}

pub struct List<'a> {
    pub catalog: &'a Catalog,
    pub state: &'a VisibilityState,
    pub last_used: Option<&'a LastUsed>,
    pub form_errors: &'a FormErrors,
    pub next: &'a str,
}

impl Render for List<'_> {
    fn render(&self) -> Markup {
        html! {
            ul #providers ."space-y-2" {
                @for provider in self.catalog.iter() {
                    (self.item(provider))
                }
            }
            @if self.state.more_shown() {
                a #show-more
                    ."block mt-3 text-center text-sm text-blue-600 hover:underline"
                    href=(page_link(self.next, false, Some(("show", "all"))))
                    _=(SHOW_MORE_SCRIPT)
                {
                    "Show more options"
                }
            }
        }
    }
}

impl List<'_> {
    fn carry_show(&self) -> bool {
        self.catalog.has_secondary() && !self.state.more_shown()
    }

    fn item(&self, provider: &Provider) -> Markup {
        let visible = self.state.is_visible(&provider.id);
        let secondary = self.catalog.is_secondary(&provider.id);
        let remembered = self.last_used.is_some_and(|last| last.matches(&provider.id));

        html! {
            li .provider .provider-secondary[secondary] .hidden[!visible] {
                a #(provider.id.attr())
                    class=(BUTTON_CLASS)
                    href=(self.button_href(provider))
                    _=[provider.form.as_ref().map(|_| toggle_script(&provider.id))]
                {
                    i class=(provider.icon_ref) {}
                    span class="flex-grow" { (provider.title) }
                    @if remembered { (LastUsedBadge) }
                }
                @if let Some(form) = &provider.form {
                    (self.inline_form(provider, form))
                }
            }
        }
    }

    // Link-only providers navigate to the initiation endpoint; in-page
    // providers fall back to a page link that re-derives the toggle
    // server-side when scripting is unavailable.
    fn button_href(&self, provider: &Provider) -> String {
        if provider.form.is_none() {
            return self.catalog.initiation_link(&provider.id, self.next);
        }

        let toggle_on = !self.state.form_revealed(&provider.id);
        let extra = toggle_on.then_some(("form", provider.id.0.as_str()));
        page_link(self.next, self.carry_show(), extra)
    }

    fn inline_form(&self, provider: &Provider, form: &InlineForm) -> Markup {
        let revealed = self.state.form_revealed(&provider.id);
        let focused = self.state.focused(&provider.id);
        let error = self.form_errors.get(&provider.id);

        html! {
            form #(form_id(&provider.id))
                ."mt-2 ml-1 p-3 border-l-2 border-gray-200"
                .hidden[!revealed]
                method="get"
                action=(self.catalog.initiation_url())
            {
                input type="hidden" name="service" value=(provider.id) {}
                input type="hidden" name="next" value=(self.next) {}

                label for=(field_id(&provider.id)) class="block mb-1 text-sm font-medium" {
                    (form.label)
                }
                div class="flex gap-2" {
                    input #(field_id(&provider.id))
                        ."flex-grow px-3 py-2 border border-gray-300 rounded-md focus:outline-none"
                        type="text"
                        name=(form.field)
                        required
                        autofocus[focused] {}
                    button type="submit"
                        class="px-4 py-2 text-white bg-blue-700 hover:bg-blue-800 rounded-md" {
                        "Go"
                    }
                }
                @if let Some(error) = error {
                    p class="mt-1 text-sm text-red-600" role="alert" { (error) }
                }
            }
        }
    }
}

fn toggle_script(id: &Id) -> String {
    format!(
        r"on click
    halt the event
    toggle .hidden on {form}
    if {form} does not match .hidden
        call {field}.focus()",
        form = form_target(id),
        field = field_target(id),
    )
}
