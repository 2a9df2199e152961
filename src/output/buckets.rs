use chrono::Duration;

/// Age category a pull request falls into once it is older than `days`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBucket {
    pub days: i64,
    pub label: &'static str,
}

impl AgeBucket {
    pub fn threshold(&self) -> Duration {
        Duration::days(self.days)
    }

    /// Strictly older than the threshold; an age equal to it does not count
    pub fn is_exceeded_by(&self, age: Duration) -> bool {
        age > self.threshold()
    }
}

/// Buckets ordered oldest first
pub const AGE_BUCKETS: [AgeBucket; 5] = [
    AgeBucket { days: 365, label: "one year" },
    AgeBucket { days: 6 * 30, label: "six months" },
    AgeBucket { days: 3 * 30, label: "three months" },
    AgeBucket { days: 30, label: "one month" },
    AgeBucket { days: 7, label: "one week" },
];

/// Index into `AGE_BUCKETS` of the oldest bucket `age` exceeds, if any
pub fn bucket_for(age: Duration) -> Option<usize> {
    AGE_BUCKETS.iter().position(|b| b.is_exceeded_by(age))
}

/// The first record (by position) to land in a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub record_index: usize,
    pub bucket_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Count per entry of `AGE_BUCKETS`, same order
    pub counts: [usize; AGE_BUCKETS.len()],
    pub transitions: Vec<Transition>,
    pub total: usize,
}

impl Classification {
    /// Records younger than every threshold
    pub fn newer_than_all(&self) -> usize {
        self.total - self.counts.iter().sum::<usize>()
    }

    /// Bucket whose marker goes right before the record at `record_index`
    pub fn marker_before(&self, record_index: usize) -> Option<AgeBucket> {
        self.transitions
            .iter()
            .find(|t| t.record_index == record_index)
            .map(|t| AGE_BUCKETS[t.bucket_index])
    }
}

/// Classify ages taken from records sorted oldest first.
///
/// Every age is counted in the oldest bucket it exceeds. The first age to
/// land in each bucket is recorded as a transition; later ones are not.
pub fn classify<I>(ages: I) -> Classification
where
    I: IntoIterator<Item = Duration>,
{
    let mut counts = [0; AGE_BUCKETS.len()];
    let mut transitions = Vec::new();
    let mut total = 0;

    for (record_index, age) in ages.into_iter().enumerate() {
        total += 1;
        let Some(bucket_index) = bucket_for(age) else {
            continue;
        };
        if counts[bucket_index] == 0 {
            transitions.push(Transition {
                record_index,
                bucket_index,
            });
        }
        counts[bucket_index] += 1;
    }

    Classification {
        counts,
        transitions,
        total,
    }
}
