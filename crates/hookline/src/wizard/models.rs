//! Wizard data models.

use serde::Serialize;

use super::catalog;
use super::error::{WizardError, WizardResult};

/// Maximum number of hooks kept from one generation.
pub const MAX_HOOKS: usize = 5;

/// Social platform a post is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Twitter,
}

impl Platform {
    /// Title-cased name used inside prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Twitter => "Twitter",
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "instagram" => Ok(Platform::Instagram),
            "twitter" => Ok(Platform::Twitter),
            _ => Err(WizardError::invalid_input(
                "Invalid platform. Choose 'Instagram' or 'Twitter'.",
            )),
        }
    }
}

/// A content style descriptor from the static catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    /// Guidance handed to the model verbatim.
    pub description: &'static str,
    /// Style label.
    pub style: &'static str,
    /// Target post length in characters.
    pub post_length: u32,
}

/// Everything hook generation needs, captured from a session.
#[derive(Debug, Clone, PartialEq)]
pub struct HookInputs {
    pub product_name: String,
    pub platform: Platform,
    pub template: Template,
}

/// Everything final post generation needs, captured from a session.
#[derive(Debug, Clone, PartialEq)]
pub struct PostInputs {
    pub hook: String,
    pub product_name: String,
    pub platform: Platform,
    pub template: Template,
}

/// In-progress wizard selections for one caller.
///
/// Fields fill in order: product, platform, template, hooks, selected hook.
/// Each transition checks its own precondition and leaves the session
/// untouched on failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    pub product_name: Option<String>,
    pub platform: Option<Platform>,
    pub template: Option<Template>,
    pub hooks: Option<Vec<String>>,
    pub selected_hook: Option<String>,
}

impl Session {
    /// Store the product name as given. Blank names are rejected.
    pub fn set_product(&mut self, name: &str) -> WizardResult<()> {
        if name.trim().is_empty() {
            return Err(WizardError::invalid_input("Product name must not be empty."));
        }
        self.product_name = Some(name.to_string());
        Ok(())
    }

    pub fn select_platform(&mut self, raw: &str) -> WizardResult<Platform> {
        let platform: Platform = raw.parse()?;
        self.platform = Some(platform);
        Ok(platform)
    }

    pub fn select_template(&mut self, name: &str) -> WizardResult<Template> {
        let template = catalog::get(name)
            .ok_or_else(|| WizardError::not_found(format!("Template '{}' not found.", name)))?;
        self.template = Some(template);
        Ok(template)
    }

    pub fn hook_inputs(&self) -> WizardResult<HookInputs> {
        match (&self.product_name, self.platform, self.template) {
            (Some(product_name), Some(platform), Some(template)) => Ok(HookInputs {
                product_name: product_name.clone(),
                platform,
                template,
            }),
            _ => Err(WizardError::precondition(
                "Missing product, platform or template selection.",
            )),
        }
    }

    /// Replace the candidate hooks. A previously selected hook belonged to
    /// the old list, so it is dropped.
    pub fn store_hooks(&mut self, hooks: Vec<String>) {
        self.hooks = Some(hooks);
        self.selected_hook = None;
    }

    /// Select a hook by its 1-based position.
    pub fn select_hook(&mut self, number: i64) -> WizardResult<&str> {
        let hooks = match &self.hooks {
            Some(hooks) if !hooks.is_empty() => hooks,
            _ => return Err(WizardError::precondition("Hooks not generated yet.")),
        };

        let index = usize::try_from(number)
            .ok()
            .filter(|n| (1..=hooks.len()).contains(n))
            .ok_or_else(|| {
                WizardError::invalid_input(format!(
                    "Invalid hook number {}. Choose between 1 and {}.",
                    number,
                    hooks.len()
                ))
            })?;

        let hook = hooks[index - 1].clone();
        Ok(self.selected_hook.insert(hook).as_str())
    }

    pub fn post_inputs(&self) -> WizardResult<PostInputs> {
        match (
            &self.selected_hook,
            &self.product_name,
            self.platform,
            self.template,
        ) {
            (Some(hook), Some(product_name), Some(platform), Some(template)) => Ok(PostInputs {
                hook: hook.clone(),
                product_name: product_name.clone(),
                platform,
                template,
            }),
            _ => Err(WizardError::precondition("Missing required selections.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_for_hooks() -> Session {
        let mut session = Session::default();
        session.set_product("SuperWidget").unwrap();
        session.select_platform("twitter").unwrap();
        session.select_template("Short").unwrap();
        session
    }

    #[test]
    fn test_platform_parse_is_case_insensitive() {
        assert_eq!("INSTAGRAM".parse::<Platform>().unwrap(), Platform::Instagram);
        assert_eq!("instagram".parse::<Platform>().unwrap(), Platform::Instagram);
        assert_eq!("Twitter".parse::<Platform>().unwrap(), Platform::Twitter);
    }

    #[test]
    fn test_platform_parse_rejects_unknown() {
        let err = "facebook".parse::<Platform>().unwrap_err();
        assert!(matches!(err, WizardError::InvalidInput(_)));

        for padded in [" twitter", "  twitter\n", "instagram "] {
            let err = padded.parse::<Platform>().unwrap_err();
            assert!(matches!(err, WizardError::InvalidInput(_)), "{padded:?}");
        }
    }

    #[test]
    fn test_platform_display_name() {
        assert_eq!(Platform::Instagram.display_name(), "Instagram");
        assert_eq!(Platform::Twitter.display_name(), "Twitter");
    }

    #[test]
    fn test_set_product_overwrites() {
        let mut session = Session::default();
        session.set_product("First").unwrap();
        session.set_product("Second").unwrap();
        assert_eq!(session.product_name.as_deref(), Some("Second"));
    }

    #[test]
    fn test_set_product_keeps_name_verbatim() {
        let mut session = Session::default();
        session.set_product("  Super Widget ").unwrap();
        assert_eq!(session.product_name.as_deref(), Some("  Super Widget "));
    }

    #[test]
    fn test_set_product_rejects_blank() {
        let mut session = Session::default();
        let err = session.set_product("   ").unwrap_err();
        assert!(matches!(err, WizardError::InvalidInput(_)));
        assert!(session.product_name.is_none());
    }

    #[test]
    fn test_failed_platform_leaves_previous_value() {
        let mut session = Session::default();
        session.select_platform("instagram").unwrap();
        assert!(session.select_platform("facebook").is_err());
        assert_eq!(session.platform, Some(Platform::Instagram));
    }

    #[test]
    fn test_select_template_unknown() {
        let mut session = Session::default();
        let err = session.select_template("Nonexistent").unwrap_err();
        assert!(matches!(err, WizardError::NotFound(_)));
        assert!(session.template.is_none());
    }

    #[test]
    fn test_select_template_stores_resolved_template() {
        let mut session = Session::default();
        let template = session.select_template("Short").unwrap();
        assert_eq!(template.post_length, 150);
        assert_eq!(session.template, Some(template));
    }

    #[test]
    fn test_hook_inputs_require_template() {
        let mut session = Session::default();
        session.set_product("SuperWidget").unwrap();
        session.select_platform("twitter").unwrap();
        let err = session.hook_inputs().unwrap_err();
        assert!(matches!(err, WizardError::PreconditionFailed(_)));
    }

    #[test]
    fn test_hook_inputs_complete() {
        let inputs = ready_for_hooks().hook_inputs().unwrap();
        assert_eq!(inputs.product_name, "SuperWidget");
        assert_eq!(inputs.platform, Platform::Twitter);
        assert_eq!(inputs.template.style, "Short");
    }

    #[test]
    fn test_select_hook_before_generation() {
        let mut session = ready_for_hooks();
        let err = session.select_hook(1).unwrap_err();
        assert!(matches!(err, WizardError::PreconditionFailed(_)));
    }

    #[test]
    fn test_select_hook_bounds() {
        let mut session = ready_for_hooks();
        session.store_hooks(vec!["a".into(), "b".into(), "c".into()]);

        for bad in [0, -1, 4, 6] {
            let err = session.select_hook(bad).unwrap_err();
            assert!(matches!(err, WizardError::InvalidInput(_)), "index {bad}");
        }
        assert!(session.selected_hook.is_none());

        assert_eq!(session.select_hook(3).unwrap(), "c");
        assert_eq!(session.selected_hook.as_deref(), Some("c"));
    }

    #[test]
    fn test_store_hooks_clears_selection() {
        let mut session = ready_for_hooks();
        session.store_hooks(vec!["old".into()]);
        session.select_hook(1).unwrap();

        session.store_hooks(vec!["new".into()]);
        assert!(session.selected_hook.is_none());
        assert!(session.post_inputs().is_err());
    }

    #[test]
    fn test_post_inputs_complete() {
        let mut session = ready_for_hooks();
        session.store_hooks(vec!["Hook one".into(), "Hook two".into()]);
        session.select_hook(2).unwrap();

        let inputs = session.post_inputs().unwrap();
        assert_eq!(inputs.hook, "Hook two");
        assert_eq!(inputs.product_name, "SuperWidget");
    }
}
