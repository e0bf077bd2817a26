use crate::{
    discogs::DiscogsError,
    types::{CanonicalRecord, GradePrices, RawRelease, ReleaseEnrichment},
    utils,
};

impl CanonicalRecord {
    /// Normalizes a raw catalog entry into its artist key and record.
    pub fn from_raw(release: &RawRelease) -> Result<(String, Self), DiscogsError> {
        let info = &release.basic_information;
        let (format, quantity) = utils::format_summary(&info.formats).ok_or_else(|| {
            DiscogsError::InvalidPayload(format!(
                "release {} has a non-numeric format quantity",
                release.id
            ))
        })?;

        let record = CanonicalRecord {
            album: utils::title_case(&info.title),
            year: info.year,
            id: release.id,
            format,
            quantity,
            instance_id: release.instance_id(),
            catno: utils::catalog_numbers(&info.labels),
            styles: utils::styles(&info.styles),
            url: info.resource_url.clone(),
            have: None,
            want: None,
            uri: None,
            notes: None,
            num_for_sale: None,
            lowest_price: None,
            prices: None,
        };

        Ok((utils::artist_name(&info.artists), record))
    }

    /// Fills the detail fields that are still unset.
    pub fn merge_details(&mut self, details: ReleaseEnrichment) {
        self.have.get_or_insert(details.have);
        self.want.get_or_insert(details.want);
        self.uri.get_or_insert(details.uri);
        self.notes.get_or_insert(details.notes);
        self.num_for_sale.get_or_insert(details.num_for_sale);
        self.lowest_price.get_or_insert(details.lowest_price);
    }

    /// Sets the price suggestions unless they were already set.
    pub fn merge_prices(&mut self, prices: GradePrices) {
        self.prices.get_or_insert(prices);
    }

    pub fn has_details(&self) -> bool {
        self.uri.is_some()
    }
}
