pub mod drush;

use crate::error::Result;
use async_trait::async_trait;

pub use drush::DrushSite;

/// Typed view of the live site: the only way the validators touch it.
#[async_trait]
pub trait SiteAdmin: Send + Sync {
    /// True when the site is installed and bootstraps
    async fn is_bootstrapped(&self) -> Result<bool>;

    /// Works for modules and themes alike
    async fn is_module_enabled(&self, name: &str) -> Result<bool>;

    async fn uninstall_module(&self, name: &str) -> Result<()>;

    async fn uninstall_theme(&self, name: &str) -> Result<()>;

    /// Currently configured administration theme, if any
    async fn admin_theme(&self) -> Result<Option<String>>;

    async fn set_admin_theme(&self, name: &str) -> Result<()>;

    async fn rebuild_cache(&self) -> Result<()>;

    /// Post-update functions recorded as executed
    async fn executed_post_updates(&self) -> Result<Vec<String>>;
}

#[cfg(test)]
pub mod fake {
    //! In-memory `SiteAdmin` for validator tests.

    use super::*;
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    pub struct State {
        pub bootstrapped: bool,
        pub enabled: BTreeSet<String>,
        pub admin_theme: Option<String>,
        pub post_updates: Vec<String>,
        /// Uninstalls of these names report success but change nothing
        pub stuck: BTreeSet<String>,
        /// Mutating calls, in order
        pub calls: Vec<String>,
        /// Names passed to `is_module_enabled`, in order
        pub queries: Vec<String>,
    }

    #[derive(Default)]
    pub struct FakeSite {
        pub state: Mutex<State>,
    }

    impl FakeSite {
        pub fn live(enabled: &[&str]) -> Self {
            let site = Self::default();
            {
                let mut state = site.state.lock().unwrap();
                state.bootstrapped = true;
                state.enabled = enabled.iter().map(|s| s.to_string()).collect();
            }
            site
        }

        pub fn with_admin_theme(self, theme: &str) -> Self {
            self.state.lock().unwrap().admin_theme = Some(theme.to_string());
            self
        }

        pub fn with_stuck(self, name: &str) -> Self {
            self.state.lock().unwrap().stuck.insert(name.to_string());
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.state.lock().unwrap().calls.clone()
        }

        fn remove(&self, call: String, name: &str) {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call);
            if !state.stuck.contains(name) {
                state.enabled.remove(name);
            }
        }
    }

    #[async_trait]
    impl SiteAdmin for FakeSite {
        async fn is_bootstrapped(&self) -> Result<bool> {
            Ok(self.state.lock().unwrap().bootstrapped)
        }

        async fn is_module_enabled(&self, name: &str) -> Result<bool> {
            let mut state = self.state.lock().unwrap();
            state.queries.push(name.to_string());
            Ok(state.enabled.contains(name))
        }

        async fn uninstall_module(&self, name: &str) -> Result<()> {
            self.remove(format!("pmu {}", name), name);
            Ok(())
        }

        async fn uninstall_theme(&self, name: &str) -> Result<()> {
            self.remove(format!("thun {}", name), name);
            Ok(())
        }

        async fn admin_theme(&self) -> Result<Option<String>> {
            Ok(self.state.lock().unwrap().admin_theme.clone())
        }

        async fn set_admin_theme(&self, name: &str) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            state.calls.push(format!("cset admin {}", name));
            state.admin_theme = Some(name.to_string());
            Ok(())
        }

        async fn rebuild_cache(&self) -> Result<()> {
            self.state.lock().unwrap().calls.push("cr".to_string());
            Ok(())
        }

        async fn executed_post_updates(&self) -> Result<Vec<String>> {
            Ok(self.state.lock().unwrap().post_updates.clone())
        }
    }
}
