use std::collections::HashSet;

use crate::provider::Id;
use crate::provider::model::{Catalog, FormErrors, LastUsed};

/// Which parts of the login screen are visible. Derived per render, never
/// persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityState {
    visible: HashSet<Id>,
    revealed_forms: HashSet<Id>,
    focus: Option<Id>,
    password_expanded: bool,
    more_shown: bool,
}

impl VisibilityState {
    /// The first two providers are always visible; a secondary provider is
    /// visible only when it is the remembered method or carries an inline
    /// error. A form with an inline error starts revealed and focused so the
    /// user sees it without an extra click. The password panel starts
    /// expanded when it is the remembered method or failed on the way here.
    pub fn initial(catalog: &Catalog, last_used: Option<&LastUsed>, errors: &FormErrors) -> Self {
        let mut state = Self::default();

        for (pos, provider) in catalog.iter().enumerate() {
            let primary = pos < Catalog::PRIMARY;
            let remembered = last_used.is_some_and(|last| last.matches(&provider.id));
            let failed = errors.get(&provider.id).is_some();

            if primary || remembered || failed {
                state.visible.insert(provider.id.clone());
            }

            if failed && provider.form.is_some() {
                state.revealed_forms.insert(provider.id.clone());
                state.focus = Some(provider.id.clone());
            }
        }

        state.more_shown = catalog
            .iter()
            .any(|p| catalog.is_secondary(&p.id) && !state.visible.contains(&p.id));

        state.password_expanded =
            last_used.is_some_and(LastUsed::is_password) || errors.password().is_some();

        state
    }

    pub fn is_visible(&self, id: &Id) -> bool {
        self.visible.contains(id)
    }

    pub fn form_revealed(&self, id: &Id) -> bool {
        self.revealed_forms.contains(id)
    }

    pub fn focused(&self, id: &Id) -> bool {
        self.focus.as_ref().is_some_and(|f| f.eq(id))
    }

    pub fn password_expanded(&self) -> bool {
        self.password_expanded
    }

    pub fn more_shown(&self) -> bool {
        self.more_shown
    }

    pub(super) fn reveal_all(&mut self, catalog: &Catalog) {
        for provider in catalog.iter() {
            self.visible.insert(provider.id.clone());
        }
        self.more_shown = false;
    }

    pub(super) fn set_form(&mut self, id: &Id, revealed: bool) {
        if revealed {
            self.revealed_forms.insert(id.clone());
            self.focus = Some(id.clone());
        } else {
            self.revealed_forms.remove(id);
            if self.focused(id) {
                self.focus = None;
            }
        }
    }

    pub(super) fn expand_password(&mut self) {
        self.password_expanded = true;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::provider::model::{InlineForm, Provider};

    fn catalog() -> Catalog {
        Catalog::new(
            "/auth/login",
            vec![
                plain("github", "GitHub"),
                plain("google", "Google"),
                in_page("openid", "OpenID"),
                plain("twitter", "Twitter"),
            ],
        )
    }

    fn plain(id: &str, title: &str) -> Provider {
        Provider {
            id: Id(id.into()),
            title: title.into(),
            icon_ref: format!("fa-brands fa-{id}"),
            form: None,
        }
    }

    fn in_page(id: &str, title: &str) -> Provider {
        Provider {
            form: Some(InlineForm {
                field: id.into(),
                label: format!("{title} URL"),
            }),
            ..plain(id, title)
        }
    }

    fn id(raw: &str) -> Id {
        Id(raw.into())
    }

    #[test]
    fn should_show_only_primary_providers_to_a_new_visitor() {
        let state = VisibilityState::initial(&catalog(), None, &FormErrors::default());

        assert!(state.is_visible(&id("github")));
        assert!(state.is_visible(&id("google")));
        assert!(!state.is_visible(&id("openid")));
        assert!(!state.is_visible(&id("twitter")));
        assert!(state.more_shown());
        assert!(!state.password_expanded());
    }

    #[test]
    fn should_show_remembered_secondary_provider() {
        let last = LastUsed::parse("twitter");

        let state = VisibilityState::initial(&catalog(), Some(&last), &FormErrors::default());

        assert!(state.is_visible(&id("github")));
        assert!(state.is_visible(&id("google")));
        assert!(state.is_visible(&id("twitter")));
        assert!(!state.is_visible(&id("openid")));
        // openid is still hidden, so the affordance stays.
        assert!(state.more_shown());
    }

    #[test]
    fn should_hide_affordance_when_nothing_is_left_to_show() {
        let catalog = Catalog::new("/auth/login", vec![plain("github", "GitHub")]);

        let state = VisibilityState::initial(&catalog, None, &FormErrors::default());

        assert!(!state.more_shown());
    }

    #[test]
    fn should_expand_password_panel_for_remembered_password_login() {
        let last = LastUsed::parse("password");

        let state = VisibilityState::initial(&catalog(), Some(&last), &FormErrors::default());

        assert!(state.password_expanded());
        // Affordance visibility is independent of the password method.
        assert!(state.more_shown());
        assert!(!state.is_visible(&id("twitter")));
    }

    #[test]
    fn should_expand_password_panel_on_password_error() {
        let errors = FormErrors::from_query(Some("password"), Some("incorrect password"));

        let state = VisibilityState::initial(&catalog(), None, &errors);

        assert!(state.password_expanded());
    }

    #[test]
    fn should_reveal_and_focus_form_with_inline_error() {
        let errors = FormErrors::from_query(Some("openid"), Some("not a valid identifier"));

        let state = VisibilityState::initial(&catalog(), None, &errors);

        assert!(state.is_visible(&id("openid")));
        assert!(state.form_revealed(&id("openid")));
        assert!(state.focused(&id("openid")));
        assert!(!state.password_expanded());
    }
}
