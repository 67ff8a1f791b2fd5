//! Batch scheduling of discovery over many domains.

use std::collections::BTreeMap;
use std::time::Duration;

use futures::future::join_all;

use crate::pipeline::Discovery;
use crate::types::{DiscoveryMethod, DiscoveryResult};

impl Discovery {
    /// Runs [`Discovery::discover`] over `domains` in fixed-size concurrent
    /// groups with a delay between groups.
    ///
    /// A failure on one domain becomes a null `fallback` record for that
    /// domain; it never aborts the batch for the others. The result map is
    /// keyed by the domain strings as given.
    pub async fn batch_discover(&self, domains: &[String]) -> BTreeMap<String, DiscoveryResult> {
        let mut results = BTreeMap::new();
        let group_size = self.batch_size().max(1);

        for (group_index, group) in domains.chunks(group_size).enumerate() {
            if group_index > 0 && self.batch_delay_ms() > 0 {
                tokio::time::sleep(Duration::from_millis(self.batch_delay_ms())).await;
            }

            let attempts = group.iter().map(|domain| async move {
                let outcome = self.discover(domain).await;
                (domain.clone(), outcome)
            });

            for (domain, outcome) in join_all(attempts).await {
                let record = match outcome {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::warn!(domain = %domain, error = %e, "discovery failed — recording fallback miss");
                        DiscoveryResult::miss(DiscoveryMethod::Fallback)
                    }
                };
                results.insert(domain, record);
            }
        }

        results
    }
}
