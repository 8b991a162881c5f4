//! Locale-fallback content lookup
//!
//! Every translated resource is fetched the same way: query the requested
//! locale, and if that turns up nothing and the request wasn't for English,
//! retry once against English and flag the fallback. The EPA prediction has
//! no locale dimension and skips the retry entirely.

use crate::client::{SelectQuery, StoreClient};
use crate::error::{Result, StoreError};
use async_trait::async_trait;
use bluetrails_core::Locale;
use tracing::debug;

// Authoritative relation names. The source schema went through several
// revisions with conflicting names; these are the ones the newest revision
// settled on (see DESIGN.md).
const ANIMALS: &str = "v_animals";
const ANIMAL_COMPLETE: &str = "v_animal_complete";
const ANIMAL_SITES: &str = "v_animal_sites";
const HOME_SPEECHES: &str = "v_home_speeches";
const QUIZ_QUESTIONS: &str = "v_quiz_questions";
const QUESTION_CATEGORIES: &str = "v_question_categories";
const EPA_PREDICTIONS: &str = "v_epa_predictions";
const ANIMAL_TABLE: &str = "t_animal";

/// A lookup result together with whether the English retry supplied it
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    pub fell_back_to_en: bool,
}

impl<T> Fetched<T> {
    fn requested(data: T) -> Self {
        Self {
            data,
            fell_back_to_en: false,
        }
    }
}

/// Typed lookup interface the gateway depends on
///
/// Rows are opaque [`serde_json::Value`] records passed through unchanged;
/// the gateway never interprets their shape.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All animals with basic translated information, in display order
    async fn list_animals(&self, locale: Locale) -> Result<Fetched<Vec<serde_json::Value>>>;

    /// One animal's complete record by slug
    async fn get_animal_by_slug(&self, slug: &str, locale: Locale)
    -> Result<Fetched<serde_json::Value>>;

    /// Habitat sites for one animal, ordered by site id
    async fn list_animal_sites(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<Fetched<Vec<serde_json::Value>>>;

    /// Home page speeches, in speech order
    async fn list_home_speeches(&self, locale: Locale) -> Result<Fetched<Vec<serde_json::Value>>>;

    /// Quiz questions with options, in question order
    async fn list_quiz_questions(&self, locale: Locale) -> Result<Fetched<Vec<serde_json::Value>>>;

    /// Quiz question categories, ordered by category code
    async fn list_question_categories(
        &self,
        locale: Locale,
    ) -> Result<Fetched<Vec<serde_json::Value>>>;

    /// Locale codes present in the animal table (not deduplicated)
    async fn list_available_locales(&self) -> Result<Vec<serde_json::Value>>;

    /// Water-quality prediction for one site and date; no locale dimension
    async fn get_epa_prediction(&self, site_id: &str, date: &str) -> Result<serde_json::Value>;
}

impl StoreClient {
    /// Fetch a translated list, retrying once against English when the
    /// requested locale has no rows
    async fn list_with_fallback(
        &self,
        relation: &str,
        filters: &[(&str, &str)],
        order: &str,
        locale: Locale,
    ) -> Result<Fetched<Vec<serde_json::Value>>> {
        let rows = self
            .select_list(&localized_query(relation, filters, locale).order(order))
            .await?;

        if rows.is_empty() && !locale.is_default() {
            debug!(relation, %locale, "no rows for requested locale, retrying with en");
            let rows = self
                .select_list(&localized_query(relation, filters, Locale::En).order(order))
                .await?;
            let fell_back_to_en = !rows.is_empty();
            return Ok(Fetched {
                data: rows,
                fell_back_to_en,
            });
        }

        Ok(Fetched::requested(rows))
    }

    /// Fetch a translated single record, retrying once against English when
    /// the requested locale matched zero rows
    ///
    /// Only [`StoreError::NotFound`] triggers the retry; any other store
    /// error surfaces unchanged. When both attempts fail, the English
    /// attempt's error is returned.
    async fn single_with_fallback(
        &self,
        relation: &str,
        filters: &[(&str, &str)],
        locale: Locale,
    ) -> Result<Fetched<serde_json::Value>> {
        match self
            .select_single(&localized_query(relation, filters, locale))
            .await
        {
            Ok(row) => Ok(Fetched::requested(row)),
            Err(StoreError::NotFound) if !locale.is_default() => {
                debug!(relation, %locale, "no row for requested locale, retrying with en");
                let row = self
                    .select_single(&localized_query(relation, filters, Locale::En))
                    .await?;
                Ok(Fetched {
                    data: row,
                    fell_back_to_en: true,
                })
            }
            Err(err) => Err(err),
        }
    }
}

fn localized_query<'a>(
    relation: &'a str,
    filters: &[(&'a str, &'a str)],
    locale: Locale,
) -> SelectQuery<'a> {
    let mut query = SelectQuery::from(relation);
    for (column, value) in filters {
        query = query.eq(column, *value);
    }
    query.eq("locale", locale.as_str())
}

#[async_trait]
impl ContentStore for StoreClient {
    async fn list_animals(&self, locale: Locale) -> Result<Fetched<Vec<serde_json::Value>>> {
        self.list_with_fallback(ANIMALS, &[], "display_order", locale)
            .await
    }

    async fn get_animal_by_slug(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<Fetched<serde_json::Value>> {
        self.single_with_fallback(ANIMAL_COMPLETE, &[("slug", slug)], locale)
            .await
    }

    async fn list_animal_sites(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<Fetched<Vec<serde_json::Value>>> {
        self.list_with_fallback(ANIMAL_SITES, &[("slug", slug)], "site_id", locale)
            .await
    }

    async fn list_home_speeches(&self, locale: Locale) -> Result<Fetched<Vec<serde_json::Value>>> {
        self.list_with_fallback(HOME_SPEECHES, &[], "speech_order", locale)
            .await
    }

    async fn list_quiz_questions(&self, locale: Locale) -> Result<Fetched<Vec<serde_json::Value>>> {
        self.list_with_fallback(QUIZ_QUESTIONS, &[], "question_order", locale)
            .await
    }

    async fn list_question_categories(
        &self,
        locale: Locale,
    ) -> Result<Fetched<Vec<serde_json::Value>>> {
        self.list_with_fallback(QUESTION_CATEGORIES, &[], "category_code", locale)
            .await
    }

    async fn list_available_locales(&self) -> Result<Vec<serde_json::Value>> {
        self.select_list(&SelectQuery::from(ANIMAL_TABLE).columns("locale").limit(1000))
            .await
    }

    async fn get_epa_prediction(&self, site_id: &str, date: &str) -> Result<serde_json::Value> {
        self.select_single(
            &SelectQuery::from(EPA_PREDICTIONS)
                .eq("site_id", site_id)
                .eq("date", date),
        )
        .await
    }
}
