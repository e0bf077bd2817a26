use std::path::PathBuf;

use tabled::Table;

use crate::{
    Verbosity,
    discogs::{Discogs, DiscogsClient, NoProgress, ProgressReporter},
    error, info, spreadsheet, success,
    types::{CatalogExport, CatalogKind, Currency, EnrichmentOptions, Pass, SummaryTableRow},
    verbosity, warning,
};

use super::progress::BarProgress;

/// Resolved options of one export run.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub token: String,
    pub currency: Currency,
    pub details: bool,
    pub prices: bool,
    pub file: Option<PathBuf>,
}

impl ExportSettings {
    fn enrichment(&self) -> EnrichmentOptions {
        EnrichmentOptions {
            details: self.details,
            prices: self.prices,
            currency: self.currency,
        }
    }

    fn output_path(&self, kind: CatalogKind) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| PathBuf::from(kind.default_file()))
    }
}

/// Exports a collection or wantlist into an xlsx file.
///
/// A rejected token ends the program. Any other failure leaves a partial
/// export, which is still written and reported as partial.
pub async fn export(kind: CatalogKind, settings: ExportSettings) {
    let mut progress: Box<dyn ProgressReporter> = if verbosity() >= Verbosity::Normal {
        Box::new(BarProgress::new())
    } else {
        Box::new(NoProgress)
    };

    let client = match DiscogsClient::new(settings.token.clone()) {
        Ok(client) => client,
        Err(e) => error!("Cannot create Discogs client. Err: {}", e),
    };

    let mut discogs = match Discogs::connect(client, settings.currency).await {
        Ok(discogs) => discogs,
        Err(_) => error!("Invalid Discogs token."),
    };

    info!("Fetching Discogs {} of {}.", kind, discogs.username());

    let catalog = match discogs
        .export(kind, settings.enrichment(), progress.as_mut())
        .await
    {
        Ok(catalog) => catalog,
        Err(e) => error!("Discogs rejected the token while fetching the {}. Err: {}", kind, e),
    };

    if catalog.aggregate.is_empty() {
        warning!("No releases found in the {}.", kind);
    }
    if catalog.is_partial() {
        warning!("The {} export is partial, some data could not be fetched.", kind);
    }

    let path = settings.output_path(kind);
    info!("Saving data to \"{}\".", path.display());
    match spreadsheet::write_catalog(&catalog, &path, progress.as_mut()) {
        Ok(rows) => success!("Saved {} releases to \"{}\".", rows, path.display()),
        Err(e) => error!("Cannot write \"{}\". Err: {}", path.display(), e),
    }

    if verbosity() >= Verbosity::Normal {
        let table = Table::new(vec![summary_row(&catalog)]);
        println!("{}", table);
    }
}

fn summary_row(catalog: &CatalogExport) -> SummaryTableRow {
    let status = catalog
        .passes
        .iter()
        .filter(|p| !p.outcome.is_complete())
        .map(|p| format!("{} partial", p.pass))
        .collect::<Vec<String>>();

    SummaryTableRow {
        catalog: catalog.kind.to_string(),
        artists: catalog.aggregate.count_artists(),
        releases: catalog.aggregate.count_releases(),
        details: pass_count(catalog, Pass::Details, catalog.aggregate.count_with_details()),
        prices: pass_count(catalog, Pass::Prices, catalog.aggregate.count_with_prices()),
        status: if status.is_empty() {
            "complete".to_string()
        } else {
            status.join(", ")
        },
    }
}

fn pass_count(catalog: &CatalogExport, pass: Pass, count: usize) -> String {
    match catalog.outcome(pass) {
        Some(_) => count.to_string(),
        None => "-".to_string(),
    }
}
