use crate::error::{Result, ValidationError};
use crate::executor::runner::CommandRunner;
use crate::site::SiteAdmin;
use async_trait::async_trait;
use serde_json::Value;

const STATUS_ENABLED: &str = "Enabled";

const EXISTING_UPDATES_PHP: &str =
    "echo json_encode(\\Drupal::keyValue('post_update')->get('existing_updates') ?? []);";

/// `SiteAdmin` backed by the drush CLI of the project.
pub struct DrushSite {
    runner: CommandRunner,
}

impl DrushSite {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }

    /// `pm:list --field=status` prints `Enabled`, `Disabled` or nothing
    fn parse_status(output: &str) -> bool {
        output.trim() == STATUS_ENABLED
    }

    /// `config:get --format=json` prints `{"system.theme:admin": "claro"}`
    fn parse_config_value(command: &str, output: &str) -> Result<Option<String>> {
        let trimmed = output.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let value: Value =
            serde_json::from_str(trimmed).map_err(|_| ValidationError::UnexpectedOutput {
                command: command.to_string(),
                output: trimmed.to_string(),
            })?;

        let found = match &value {
            Value::Object(map) => map.values().next().cloned(),
            other => Some(other.clone()),
        };

        match found {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(ValidationError::UnexpectedOutput {
                command: command.to_string(),
                output: trimmed.to_string(),
            }),
        }
    }

    fn parse_update_list(command: &str, output: &str) -> Result<Vec<String>> {
        let trimmed = output.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Value>(trimmed) {
            // keyValue lists can come back as objects when keys are not sequential
            Ok(Value::Array(items)) => Ok(items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()),
            Ok(Value::Object(map)) => Ok(map
                .into_iter()
                .filter_map(|(_, v)| v.as_str().map(str::to_string))
                .collect()),
            _ => Err(ValidationError::UnexpectedOutput {
                command: command.to_string(),
                output: trimmed.to_string(),
            }),
        }
    }
}

#[async_trait]
impl SiteAdmin for DrushSite {
    async fn is_bootstrapped(&self) -> Result<bool> {
        let args = ["status", "--field=Drupal bootstrap"];
        match self.runner.execute(&args).await {
            Ok(output) => Ok(!output.trim().is_empty()),
            // No drush or no site: nothing to validate yet
            Err(ValidationError::CommandFailed { command, stderr }) => {
                log::debug!("{} failed, treating site as absent: {}", command, stderr);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn is_module_enabled(&self, name: &str) -> Result<bool> {
        let filter = format!("--filter=name={}", name);
        let output = self
            .runner
            .execute(&["pm:list", "--field=status", &filter])
            .await?;
        Ok(Self::parse_status(&output))
    }

    async fn uninstall_module(&self, name: &str) -> Result<()> {
        self.runner.execute(&["pm:uninstall", name, "-y"]).await?;
        Ok(())
    }

    async fn uninstall_theme(&self, name: &str) -> Result<()> {
        self.runner.execute(&["theme:uninstall", name, "-y"]).await?;
        Ok(())
    }

    async fn admin_theme(&self) -> Result<Option<String>> {
        let args = [
            "config:get",
            "--include-overridden",
            "system.theme",
            "admin",
            "--format=json",
        ];
        let output = self.runner.execute(&args).await?;
        Self::parse_config_value(&self.runner.describe(&args), &output)
    }

    async fn set_admin_theme(&self, name: &str) -> Result<()> {
        self.runner
            .execute(&["config:set", "system.theme", "admin", name, "-y"])
            .await?;
        Ok(())
    }

    async fn rebuild_cache(&self) -> Result<()> {
        self.runner.execute(&["cache:rebuild"]).await?;
        Ok(())
    }

    async fn executed_post_updates(&self) -> Result<Vec<String>> {
        let args = ["php:eval", EXISTING_UPDATES_PHP];
        let output = self.runner.execute(&args).await?;
        Self::parse_update_list(&self.runner.describe(&args), &output)
    }
}
