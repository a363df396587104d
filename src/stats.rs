use serde::Serialize;

use crate::model::{Student, COURSES};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CourseCount {
    pub course: &'static str,
    pub count: usize,
}

/// Size of the roster handed in; the caller already merged seed and store.
pub fn total_count(records: &[Student]) -> usize {
    records.len()
}

/// One bucket per enumerated course, zero counts included, sorted by count
/// descending. The sort is stable, so equal counts keep enumeration order;
/// this makes the top-N deterministic. Courses outside the enumeration are
/// not counted.
pub fn course_distribution(records: &[Student], top_n: usize) -> Vec<CourseCount> {
    let mut buckets: Vec<CourseCount> = COURSES
        .iter()
        .copied()
        .map(|course| CourseCount {
            course,
            count: records.iter().filter(|s| s.course == course).count(),
        })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets.truncate(top_n);
    buckets
}
