use std::ops::RangeInclusive;

use crate::{
    debug,
    discogs::{DiscogsClient, DiscogsError, PassOutcome, ProgressReporter},
    management::CatalogAggregate,
    types::{CatalogPage, CollectionFolder, RawRelease, WantlistInfo},
    utils,
};

pub fn collection_path(username: &str) -> String {
    format!("/users/{}/collection/folders/0", username)
}

pub fn wantlist_path(username: &str) -> String {
    format!("/users/{}/wants", username)
}

/// Walks every page of the user's collection (folder 0, "All") and merges
/// its releases into `aggregate`.
///
/// # Errors
///
/// Only [`DiscogsError::Authentication`] is returned as an error. Any other
/// failure stops the walk and is reported as [`PassOutcome::Partial`], with
/// the releases of the pages fetched so far left in `aggregate`.
pub async fn fetch_collection(
    client: &mut DiscogsClient,
    username: &str,
    aggregate: &mut CatalogAggregate,
    progress: &mut dyn ProgressReporter,
) -> Result<PassOutcome, DiscogsError> {
    let result = walk_collection(client, username, aggregate, progress).await;
    progress.finish();
    PassOutcome::settle("collection", result)
}

/// Walks every page of the user's wantlist and merges its releases into
/// `aggregate`. Failure handling is the same as for [`fetch_collection`].
pub async fn fetch_wantlist(
    client: &mut DiscogsClient,
    username: &str,
    aggregate: &mut CatalogAggregate,
    progress: &mut dyn ProgressReporter,
) -> Result<PassOutcome, DiscogsError> {
    let result = walk_wantlist(client, username, aggregate, progress).await;
    progress.finish();
    PassOutcome::settle("wantlist", result)
}

async fn walk_collection(
    client: &mut DiscogsClient,
    username: &str,
    aggregate: &mut CatalogAggregate,
    progress: &mut dyn ProgressReporter,
) -> Result<(), DiscogsError> {
    let folder_path = collection_path(username);
    let releases_path = format!("{}/releases", folder_path);

    let folder: CollectionFolder = client.get(&folder_path, &[("page", "1".to_string())]).await?;
    let pages = utils::collection_page_count(folder.count).ok_or_else(|| {
        DiscogsError::InvalidPayload(format!(
            "collection count {} is out of range",
            folder.count
        ))
    })?;
    debug!(
        "Collection holds {} items, walking {} pages",
        folder.count, pages
    );

    progress.start("Collection", pages as u64);
    walk_pages(client, &releases_path, 1..=pages, pages - 1, aggregate, progress).await
}

async fn walk_wantlist(
    client: &mut DiscogsClient,
    username: &str,
    aggregate: &mut CatalogAggregate,
    progress: &mut dyn ProgressReporter,
) -> Result<(), DiscogsError> {
    let path = wantlist_path(username);

    // the metadata request already is page 1
    let info: WantlistInfo = client.get(&path, &[]).await?;
    let reported = info.pagination.pages;
    let pages = utils::wantlist_page_count(reported);
    debug!(
        "Wantlist reports {} pages, walking {} pages",
        reported, pages
    );

    progress.start("Wantlist", pages as u64);
    aggregate.merge_releases(&info.wants)?;
    progress.advance();

    walk_pages(client, &path, 2..=pages, reported, aggregate, progress).await
}

/// Fetches and merges `pages` of a catalog listing.
///
/// Pages past `reported_last` are guard pages: the server may answer them
/// with an empty list or an error, and either ends the walk normally. Page 1
/// is never a guard page. An empty page inside the reported range is
/// skipped and the walk goes on.
async fn walk_pages(
    client: &mut DiscogsClient,
    path: &str,
    pages: RangeInclusive<u32>,
    reported_last: u32,
    aggregate: &mut CatalogAggregate,
    progress: &mut dyn ProgressReporter,
) -> Result<(), DiscogsError> {
    let reported_last = reported_last.max(1);

    for page in pages {
        let result = fetch_page(client, path, page).await;
        progress.advance();
        let guard = page > reported_last;

        let releases = match result {
            Ok(releases) => releases,
            Err(e) if guard && !e.is_authentication() => {
                debug!("{} guard page {} ended the walk: {}", path, page, e);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if releases.is_empty() {
            if guard {
                debug!("{} guard page {} is empty, stopping", path, page);
                return Ok(());
            }
            debug!("{} page {} is empty", path, page);
            continue;
        }

        let inserted = aggregate.merge_releases(&releases)?;
        debug!(
            "{} page {}: {} releases, {} new",
            path,
            page,
            releases.len(),
            inserted
        );
    }

    Ok(())
}

async fn fetch_page(
    client: &mut DiscogsClient,
    path: &str,
    page: u32,
) -> Result<Vec<RawRelease>, DiscogsError> {
    let content: CatalogPage = client.get(path, &[("page", page.to_string())]).await?;

    content.into_releases().ok_or_else(|| {
        DiscogsError::InvalidPayload(format!("page {} of {} has no release list", page, path))
    })
}
