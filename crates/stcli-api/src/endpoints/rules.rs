// Rule endpoints. Rules are location-scoped via a query parameter.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{ItemsList, Rule, RuleExecutionResponse};

impl ApiClient {
    /// List rules in a location.
    ///
    /// `GET /v1/rules?locationId=…`
    pub async fn list_rules(&self, location_id: &str) -> Result<Vec<Rule>, Error> {
        let list: ItemsList<Rule> = self
            .get_with_params("rules", &[("locationId", location_id.to_owned())])
            .await?;
        Ok(list.items)
    }

    /// Get a single rule.
    ///
    /// `GET /v1/rules/{ruleId}?locationId=…`
    pub async fn get_rule(&self, rule_id: &str, location_id: &str) -> Result<Rule, Error> {
        self.get_with_params(
            &format!("rules/{rule_id}"),
            &[("locationId", location_id.to_owned())],
        )
        .await
    }

    /// Create a rule.
    ///
    /// `POST /v1/rules?locationId=…`
    pub async fn create_rule(&self, location_id: &str, rule: &Value) -> Result<Rule, Error> {
        self.post_with_params("rules", &[("locationId", location_id.to_owned())], rule)
            .await
    }

    /// Update a rule.
    ///
    /// `PUT /v1/rules/{ruleId}?locationId=…`
    pub async fn update_rule(
        &self,
        rule_id: &str,
        location_id: &str,
        rule: &Value,
    ) -> Result<Rule, Error> {
        self.put_with_params(
            &format!("rules/{rule_id}"),
            &[("locationId", location_id.to_owned())],
            rule,
        )
        .await
    }

    /// Delete a rule.
    ///
    /// `DELETE /v1/rules/{ruleId}?locationId=…`
    pub async fn delete_rule(&self, rule_id: &str, location_id: &str) -> Result<(), Error> {
        self.delete_with_params(
            &format!("rules/{rule_id}"),
            &[("locationId", location_id.to_owned())],
        )
        .await
    }

    /// Execute a rule's actions immediately.
    ///
    /// `POST /v1/rules/execute/{ruleId}?locationId=…`
    pub async fn execute_rule(
        &self,
        rule_id: &str,
        location_id: &str,
    ) -> Result<RuleExecutionResponse, Error> {
        self.post_with_params(
            &format!("rules/execute/{rule_id}"),
            &[("locationId", location_id.to_owned())],
            &Value::Null,
        )
        .await
    }
}
