//! Paginated sensor history.
//!
//! The history endpoint serves a sensor's records in pages chained by a
//! `next` link. [`HistoryPaginator::fetch`] turns a [`SelectionCriterion`]
//! into the shortest walk along that chain that covers the selection, then
//! trims and orders what it collected.
//!
//! Pages run either oldest-first or newest-first ([`PageOrder`]). A walk has
//! "reached" a date once its last collected record lies at or beyond that
//! date in the walking direction; no later page can then hold records on the
//! near side of it.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use sensit_api::SensitApi;
use sensit_core::config::PageOrder;
use sensit_core::error::SensitResult;
use sensit_models::{HistoryPage, RawRecord, SelectionCriterion};

/// Collects sensor history records page by page.
///
/// Stateless between calls: every `fetch` owns its buffer, so one paginator
/// can serve any number of callers.
#[derive(Debug, Clone)]
pub struct HistoryPaginator {
    api: SensitApi,
    order: PageOrder,
}

/// Accumulated state of one walk along the page chain.
#[derive(Debug, Default)]
struct Walk {
    records: Vec<RawRecord>,
    next: Option<String>,
    visited: HashSet<String>,
    pages: usize,
}

impl Walk {
    fn absorb(&mut self, page: HistoryPage) {
        self.pages += 1;
        // An empty page ends the chain whatever its links say.
        self.next = if page.records.is_empty() {
            None
        } else {
            page.next().map(String::from)
        };
        self.records.extend(page.records);
    }
}

impl HistoryPaginator {
    pub fn new(api: SensitApi, order: PageOrder) -> Self {
        Self { api, order }
    }

    /// Fetch the records of `resource` selected by `criterion`, oldest first.
    pub async fn fetch(
        &self,
        resource: &str,
        criterion: &SelectionCriterion,
    ) -> SensitResult<Vec<RawRecord>> {
        criterion.check().map_err(|e| e.in_method("fetch"))?;

        let mut walk = self.open(resource).await?;

        let mut records = match *criterion {
            SelectionCriterion::Count(n) => {
                self.advance_while(&mut walk, |w| w.records.len() < n).await?;
                let mut records = walk.records;
                records.truncate(n);
                records
            }

            SelectionCriterion::Range { begin, end } => {
                let far = match self.order {
                    PageOrder::OldestFirst => end,
                    PageOrder::NewestFirst => begin,
                };
                match far {
                    Some(date) => self.advance_until(&mut walk, date).await?,
                    None => self.exhaust(&mut walk).await?,
                }
                walk.records
                    .into_iter()
                    .filter(|r| begin.map_or(true, |b| r.date > b) && end.map_or(true, |e| r.date < e))
                    .collect()
            }

            SelectionCriterion::CountFromStart { begin, n } => {
                self.advance_until(&mut walk, begin).await?;
                match self.order {
                    PageOrder::OldestFirst => {
                        self.advance_while(&mut walk, |w| count_after(&w.records, begin) < n)
                            .await?;
                        let mut records = after(walk.records, begin);
                        records.truncate(n);
                        records
                    }
                    PageOrder::NewestFirst => tail(after(walk.records, begin), n),
                }
            }

            SelectionCriterion::CountUntilEnd { end, n } => {
                self.advance_until(&mut walk, end).await?;
                match self.order {
                    PageOrder::OldestFirst => tail(before(walk.records, end), n),
                    PageOrder::NewestFirst => {
                        self.advance_while(&mut walk, |w| count_before(&w.records, end) < n)
                            .await?;
                        let mut records = before(walk.records, end);
                        records.truncate(n);
                        records
                    }
                }
            }
        };

        records.sort_by_key(|r| r.date);
        debug!(
            "{resource}: {} record(s) from {} page(s) for {:?}",
            records.len(),
            walk.pages,
            criterion
        );
        Ok(records)
    }

    /// Fetch the first page of `resource`.
    async fn open(&self, resource: &str) -> SensitResult<Walk> {
        let mut walk = Walk::default();
        walk.visited.insert(resource.to_string());
        let page = self.api.history_page(resource).await?;
        walk.absorb(page);
        Ok(walk)
    }

    /// Follow the `next` link once. Returns false when the chain has ended.
    async fn step(&self, walk: &mut Walk) -> SensitResult<bool> {
        let Some(next) = walk.next.take() else {
            return Ok(false);
        };
        if !walk.visited.insert(next.clone()) {
            warn!("history link {next} already visited, stopping pagination");
            return Ok(false);
        }
        let page = self.api.history_page(&next).await?;
        walk.absorb(page);
        Ok(true)
    }

    async fn advance_while<F>(&self, walk: &mut Walk, keep_going: F) -> SensitResult<()>
    where
        F: Fn(&Walk) -> bool,
    {
        while keep_going(walk) {
            if !self.step(walk).await? {
                break;
            }
        }
        Ok(())
    }

    /// Walk until `date` is reached or history runs out. A short result is not an error.
    async fn advance_until(&self, walk: &mut Walk, date: DateTime<Utc>) -> SensitResult<()> {
        let order = self.order;
        self.advance_while(walk, |w| !reached(order, &w.records, date)).await
    }

    async fn exhaust(&self, walk: &mut Walk) -> SensitResult<()> {
        self.advance_while(walk, |_| true).await
    }
}

fn reached(order: PageOrder, records: &[RawRecord], date: DateTime<Utc>) -> bool {
    match (order, records.last()) {
        (_, None) => false,
        (PageOrder::OldestFirst, Some(last)) => last.date >= date,
        (PageOrder::NewestFirst, Some(last)) => last.date <= date,
    }
}

fn count_after(records: &[RawRecord], begin: DateTime<Utc>) -> usize {
    records.iter().filter(|r| r.date > begin).count()
}

fn count_before(records: &[RawRecord], end: DateTime<Utc>) -> usize {
    records.iter().filter(|r| r.date < end).count()
}

fn after(records: Vec<RawRecord>, begin: DateTime<Utc>) -> Vec<RawRecord> {
    records.into_iter().filter(|r| r.date > begin).collect()
}

fn before(records: Vec<RawRecord>, end: DateTime<Utc>) -> Vec<RawRecord> {
    records.into_iter().filter(|r| r.date < end).collect()
}

/// Last `n` records in upstream order.
fn tail(mut records: Vec<RawRecord>, n: usize) -> Vec<RawRecord> {
    let skip = records.len().saturating_sub(n);
    records.split_off(skip)
}
