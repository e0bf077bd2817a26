use crate::{
    debug,
    discogs::{DiscogsClient, DiscogsError, PassOutcome, ProgressReporter},
    info,
    management::CatalogAggregate,
    types::{
        Currency, EnrichmentCandidate, GradePrices, PriceSuggestions, ReleaseDetail,
        ReleaseEnrichment,
    },
    utils,
};

pub fn release_path(release_id: u64) -> String {
    format!("/releases/{}", release_id)
}

pub fn price_suggestions_path(release_id: u64) -> String {
    format!("/marketplace/price_suggestions/{}", release_id)
}

/// Fetches the release detail of every candidate and merges community
/// counts, uri, notes, copies for sale and lowest price into `aggregate`.
///
/// Stops at the first failure; records enriched up to that point keep their
/// details. Only [`DiscogsError::Authentication`] is returned as an error.
pub async fn fetch_details(
    client: &mut DiscogsClient,
    currency: Currency,
    aggregate: &mut CatalogAggregate,
    candidates: &[EnrichmentCandidate],
    progress: &mut dyn ProgressReporter,
) -> Result<PassOutcome, DiscogsError> {
    announce("details", candidates.len(), client);
    progress.start("Details", candidates.len() as u64);

    let mut result = Ok(());
    for candidate in candidates {
        let detail: ReleaseDetail = match client
            .get(
                &release_path(candidate.release_id),
                &[("curr_abbr", currency.code().to_string())],
            )
            .await
        {
            Ok(detail) => detail,
            Err(e) => {
                result = Err(e);
                break;
            }
        };

        aggregate.merge_details(
            &candidate.artist,
            candidate.instance_id,
            release_enrichment(detail),
        );
        progress.advance();
    }

    progress.finish();
    PassOutcome::settle("details", result)
}

/// Fetches the price suggestions of every candidate and merges them into
/// `aggregate`, keyed by normalized grade.
pub async fn fetch_prices(
    client: &mut DiscogsClient,
    aggregate: &mut CatalogAggregate,
    candidates: &[EnrichmentCandidate],
    progress: &mut dyn ProgressReporter,
) -> Result<PassOutcome, DiscogsError> {
    announce("prices", candidates.len(), client);
    progress.start("Prices", candidates.len() as u64);

    let mut result = Ok(());
    for candidate in candidates {
        let suggestions: PriceSuggestions = match client
            .get(&price_suggestions_path(candidate.release_id), &[])
            .await
        {
            Ok(suggestions) => suggestions,
            Err(e) => {
                result = Err(e);
                break;
            }
        };

        aggregate.merge_prices(
            &candidate.artist,
            candidate.instance_id,
            normalize_prices(suggestions),
        );
        progress.advance();
    }

    progress.finish();
    PassOutcome::settle("prices", result)
}

/// Reduces a release detail response to the fields an export keeps.
pub fn release_enrichment(detail: ReleaseDetail) -> ReleaseEnrichment {
    ReleaseEnrichment {
        have: detail.community.have,
        want: detail.community.want,
        uri: detail.uri.unwrap_or_default(),
        notes: detail.notes.unwrap_or_default(),
        num_for_sale: detail.num_for_sale.unwrap_or(0),
        lowest_price: utils::format_price(detail.lowest_price.unwrap_or(0.0)),
    }
}

/// `{"Very Good Plus (VG+)": {value: 16.71}}` becomes
/// `{"very_good_plus": "16.71"}`. When two labels normalize to the same key
/// the first one in label order is kept.
pub fn normalize_prices(suggestions: PriceSuggestions) -> GradePrices {
    let mut prices = GradePrices::new();
    for (label, suggestion) in suggestions {
        prices
            .entry(utils::grade_key(&label))
            .or_insert_with(|| utils::format_price(suggestion.value));
    }
    prices
}

fn announce(pass: &str, requests: usize, client: &DiscogsClient) {
    if requests == 0 {
        return;
    }

    let per_minute = client.policy().budget.max(1) as usize;
    let minutes = requests.div_ceil(per_minute);
    info!(
        "Fetching {} for {} releases, this takes about {} minute(s)...",
        pass, requests, minutes
    );
    debug!("{} requests left in the current window", client.remaining());
}
