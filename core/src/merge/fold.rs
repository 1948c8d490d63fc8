use crate::config::StatsFold;
use crate::model::PlaybookResults;

/// Fold one decoded document into the running aggregate.
///
/// Plays are appended in arrival order. Host counters follow `fold`; hosts only
/// seen earlier keep their counters. Custom stats merge key by key, later wins.
pub fn fold_into(acc: &mut PlaybookResults, doc: PlaybookResults, fold: StatsFold) {
    let PlaybookResults {
        custom_stats,
        global_custom_stats,
        plays,
        stats,
    } = doc;

    acc.plays.extend(plays);

    for (host, counters) in stats {
        match fold {
            StatsFold::Replace => {
                acc.stats.insert(host, counters);
            }
            StatsFold::Sum => acc.stats.entry(host).or_default().accumulate(&counters),
        }
    }

    acc.custom_stats.extend(custom_stats);
    acc.global_custom_stats.extend(global_custom_stats);
}

/// Merge already decoded documents in order.
pub fn merge_documents<I>(docs: I, fold: StatsFold) -> PlaybookResults
where
    I: IntoIterator<Item = PlaybookResults>,
{
    docs.into_iter()
        .fold(PlaybookResults::default(), |mut acc, doc| {
            fold_into(&mut acc, doc, fold);
            acc
        })
}
