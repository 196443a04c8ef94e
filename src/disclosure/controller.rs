use crate::provider::Id;
use crate::provider::model::Catalog;

use super::Event;
use super::model::VisibilityState;

/// Rendering surface the controller drives, so transitions can be observed
/// without a page. The degraded no-script path folds events through a no-op
/// view and renders the resulting state instead.
pub trait View {
    fn show_secondary_providers(&mut self);
    fn hide_more_affordance(&mut self);
    fn set_form_revealed(&mut self, id: &Id, revealed: bool);
    fn focus_form(&mut self, id: &Id);
    fn expand_password_panel(&mut self);
}

impl View for () {
    fn show_secondary_providers(&mut self) {}
    fn hide_more_affordance(&mut self) {}
    fn set_form_revealed(&mut self, _id: &Id, _revealed: bool) {}
    fn focus_form(&mut self, _id: &Id) {}
    fn expand_password_panel(&mut self) {}
}

pub struct Controller<'a, V> {
    catalog: &'a Catalog,
    state: VisibilityState,
    view: V,
}

impl<'a, V: View> Controller<'a, V> {
    pub fn new(catalog: &'a Catalog, state: VisibilityState, view: V) -> Self {
        Self {
            catalog,
            state,
            view,
        }
    }

    pub fn apply(&mut self, event: Event) {
        match event {
            Event::ShowMore => self.show_more(),
            Event::ToggleForm(id) => self.toggle_form(&id),
            Event::ExpandPassword => self.expand_password(),
        }
    }

    pub fn state(&self) -> &VisibilityState {
        &self.state
    }

    pub fn into_state(self) -> VisibilityState {
        self.state
    }

    // One-way: once every provider is on screen the affordance is gone for
    // the rest of the page load.
    fn show_more(&mut self) {
        if !self.state.more_shown() {
            return;
        }

        self.state.reveal_all(self.catalog);
        self.view.show_secondary_providers();
        self.view.hide_more_affordance();
    }

    // Two-state toggle. Only providers with an inline form react, and only
    // while their button is on screen; revealing moves focus to the form.
    fn toggle_form(&mut self, id: &Id) {
        let Some(provider) = self.catalog.get(id) else {
            return;
        };

        if provider.form.is_none() || !self.state.is_visible(id) {
            return;
        }

        let reveal = !self.state.form_revealed(id);
        self.state.set_form(id, reveal);
        self.view.set_form_revealed(id, reveal);

        if reveal {
            self.view.focus_form(id);
        }
    }

    fn expand_password(&mut self) {
        if self.state.password_expanded() {
            return;
        }

        self.state.expand_password();
        self.view.expand_password_panel();
    }
}
