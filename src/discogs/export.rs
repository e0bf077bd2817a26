use crate::{
    debug,
    discogs::{DiscogsClient, DiscogsError, PassOutcome, ProgressReporter, catalog, enrichment},
    management::CatalogAggregate,
    types::{
        CatalogExport, CatalogKind, Currency, EnrichmentOptions, Identity, Pass, PassReport,
    },
};

const IDENTITY_PATH: &str = "/oauth/identity";

/// An authenticated Discogs session.
///
/// Holds the client and the identity it was verified with. Every export
/// runs through the same client, so its request budget carries over from
/// one pass to the next.
pub struct Discogs {
    client: DiscogsClient,
    identity: Identity,
    currency: Currency,
}

impl Discogs {
    /// Verifies the client's token against the identity endpoint.
    ///
    /// # Errors
    ///
    /// Always [`DiscogsError::Authentication`]: no catalog call can be made
    /// without a known username, whatever the reason the check failed.
    pub async fn connect(mut client: DiscogsClient, currency: Currency) -> Result<Self, DiscogsError> {
        let identity: Identity = match client.get(IDENTITY_PATH, &[]).await {
            Ok(identity) => identity,
            Err(e) if e.is_authentication() => return Err(e),
            Err(e) => {
                return Err(DiscogsError::Authentication(format!(
                    "identity check failed: {}",
                    e
                )));
            }
        };

        debug!("Authenticated as {}", identity.username);

        Ok(Self {
            client,
            identity,
            currency,
        })
    }

    pub fn username(&self) -> &str {
        &self.identity.username
    }

    pub async fn get_collection(
        &mut self,
        details: bool,
        prices: bool,
        progress: &mut dyn ProgressReporter,
    ) -> Result<CatalogExport, DiscogsError> {
        let options = EnrichmentOptions {
            details,
            prices,
            currency: self.currency,
        };
        self.export(CatalogKind::Collection, options, progress).await
    }

    pub async fn get_wantlist(
        &mut self,
        details: bool,
        prices: bool,
        progress: &mut dyn ProgressReporter,
    ) -> Result<CatalogExport, DiscogsError> {
        let options = EnrichmentOptions {
            details,
            prices,
            currency: self.currency,
        };
        self.export(CatalogKind::Wantlist, options, progress).await
    }

    /// Fetches one catalog and runs the requested enrichment passes over it.
    ///
    /// The enrichment passes run over whatever the catalog pass gathered,
    /// also when it stopped early, and a failed details pass does not keep
    /// the prices pass from running. The outcome of each pass is recorded
    /// on the returned export.
    ///
    /// # Errors
    ///
    /// Returns an error only when the token is rejected during any pass.
    pub async fn export(
        &mut self,
        kind: CatalogKind,
        options: EnrichmentOptions,
        progress: &mut dyn ProgressReporter,
    ) -> Result<CatalogExport, DiscogsError> {
        let username = self.identity.username.clone();
        let mut aggregate = CatalogAggregate::new();
        let mut passes = Vec::new();

        let outcome = match kind {
            CatalogKind::Collection => {
                catalog::fetch_collection(&mut self.client, &username, &mut aggregate, progress)
                    .await?
            }
            CatalogKind::Wantlist => {
                catalog::fetch_wantlist(&mut self.client, &username, &mut aggregate, progress)
                    .await?
            }
        };
        passes.push(report(Pass::Catalog, outcome));

        let candidates = aggregate.candidates();

        if options.details {
            let outcome = enrichment::fetch_details(
                &mut self.client,
                options.currency,
                &mut aggregate,
                &candidates,
                progress,
            )
            .await?;
            passes.push(report(Pass::Details, outcome));
        }

        if options.prices {
            let outcome =
                enrichment::fetch_prices(&mut self.client, &mut aggregate, &candidates, progress)
                    .await?;
            passes.push(report(Pass::Prices, outcome));
        }

        Ok(CatalogExport {
            username,
            kind,
            aggregate,
            passes,
        })
    }
}

fn report(pass: Pass, outcome: PassOutcome) -> PassReport {
    PassReport { pass, outcome }
}
