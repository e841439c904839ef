//! Deployment target: project, location and base function name.

use crate::domain::error::DeployError;

/// Where functions are deployed and what they are called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub project_id: String,
    pub location: String,
    pub function_name: String,
}

impl DeploymentTarget {
    #[must_use]
    pub fn new(project_id: &str, location: &str, function_name: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            location: location.to_string(),
            function_name: function_name.to_string(),
        }
    }

    /// Non-empty check on every field. Nothing else is validated.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::MissingTarget` naming the empty fields.
    pub fn validate(&self) -> Result<(), DeployError> {
        let missing: Vec<&str> = [
            ("project_id", &self.project_id),
            ("location", &self.location),
            ("function_name", &self.function_name),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DeployError::MissingTarget(missing.join(", ")))
        }
    }

    /// `projects/<project>/locations/<location>`
    #[must_use]
    pub fn parent(&self) -> String {
        format!("projects/{}/locations/{}", self.project_id, self.location)
    }

    /// Parent spanning every location of the project, for listing.
    #[must_use]
    pub fn all_locations(&self) -> String {
        format!("projects/{}/locations/-", self.project_id)
    }

    /// `<name>-<index>`
    #[must_use]
    pub fn function_id(&self, index: u32) -> String {
        format!("{}-{index}", self.function_name)
    }

    /// Full resource name of the function created for `index`.
    #[must_use]
    pub fn function_resource(&self, index: u32) -> String {
        format!("{}/functions/{}", self.parent(), self.function_id(index))
    }

    /// Resource whose IAM policy is opened to the public.
    ///
    /// This is the unsuffixed base name, which matches none of the indexed
    /// functions the deploy loop creates. Kept for compatibility.
    #[must_use]
    pub fn iam_resource(&self) -> String {
        format!("{}/functions/{}", self.parent(), self.function_name)
    }
}
