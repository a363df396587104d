use crate::model::Student;

/// Course sentinel meaning "no course filter".
pub const ALL_COURSES: &str = "all";

/// Client-side narrowing of an already-loaded roster. Pure: the input is
/// untouched and the output is a fresh vector preserving input order.
///
/// Course filter: skipped when unset, empty, or the "all" sentinel, exact
/// match otherwise. Search: skipped when empty, case-insensitive substring
/// over name OR email otherwise (any non-empty query matches literally,
/// whitespace included). The two compose with AND.
pub fn filter_students(records: &[Student], course: Option<&str>, search: &str) -> Vec<Student> {
    let course = course.filter(|c| !c.is_empty() && *c != ALL_COURSES);
    let needle = search.to_lowercase();

    records
        .iter()
        .filter(|s| course.map_or(true, |c| s.course == c))
        .filter(|s| {
            needle.is_empty()
                || s.name.to_lowercase().contains(&needle)
                || s.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed_students;

    #[test]
    fn all_and_empty_query_is_identity() {
        let roster = seed_students();
        assert_eq!(filter_students(&roster, Some("all"), ""), roster);
        assert_eq!(filter_students(&roster, None, ""), roster);
        // An explicit empty course is the reset-filters value, same as "all".
        assert_eq!(filter_students(&roster, Some(""), ""), roster);
        // Input untouched.
        assert_eq!(roster.len(), 6);
    }

    #[test]
    fn whitespace_query_matches_literally() {
        let mut roster = seed_students();
        let mut mononym = roster[0].clone();
        mononym.id = "7".to_string();
        mononym.name = "Cher".to_string();
        mononym.email = "cher@school.edu".to_string();
        roster.push(mononym);

        // A lone space is a real query: every seed name contains one, the
        // mononym record does not.
        let spaced = filter_students(&roster, None, " ");
        assert_eq!(spaced.len(), 6);
        assert!(spaced.iter().all(|s| s.name != "Cher"));
    }

    #[test]
    fn course_filter_is_exact_match() {
        let roster = seed_students();
        let eng = filter_students(&roster, Some("Engineering"), "");
        assert_eq!(eng.len(), 2);
        assert!(eng.iter().all(|s| s.course == "Engineering"));
        // Order preserved: Jane before Sarah.
        assert_eq!(eng[0].name, "Jane Smith");
        assert_eq!(eng[1].name, "Sarah Davi");
    }

    #[test]
    fn search_matches_name_or_email_case_insensitive() {
        let roster = seed_students();

        let by_name = filter_students(&roster, None, "JOHN");
        // "john" hits John Doe's name/email and Alex Johnson's name.
        assert_eq!(by_name.len(), 2);

        let by_email = filter_students(&roster, None, "emily.w@");
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].name, "Emily Wilson");
    }

    #[test]
    fn filters_compose_with_and() {
        let roster = seed_students();
        let hit = filter_students(&roster, Some("Engineering"), "sarah");
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].name, "Sarah Davi");

        // Course matches, query does not.
        assert!(filter_students(&roster, Some("Business"), "zzz").is_empty());
    }

    #[test]
    fn no_match_yields_empty_with_zero_count() {
        let roster = seed_students();
        let none = filter_students(&roster, Some("Business"), "zzz");
        assert!(none.is_empty());
        assert_eq!(crate::stats::total_count(&none), 0);
    }
}
