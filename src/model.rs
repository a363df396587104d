use serde::{Deserialize, Serialize};

/// Owner sentinel for the built-in seed roster. Never a real principal.
pub const SEED_OWNER: &str = "system";

/// Fixed course enumeration. Declaration order is the tie-break order for
/// the dashboard distribution, so keep it stable.
pub const COURSES: &[&str] = &[
    "Computer Science",
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "Engineering",
    "Literature",
    "History",
    "Economics",
];

pub fn is_known_course(course: &str) -> bool {
    COURSES.contains(&course)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub course: String,
    pub grade: String,
    pub enrollment_date: String,
    pub avatar: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Caller-validated input for `access::create`. The IPC handler checks
/// required fields, email shape, course membership and date shape before
/// building one of these.
#[derive(Debug, Clone)]
pub struct StudentForm {
    pub name: String,
    pub email: String,
    pub course: String,
    pub grade: String,
    pub enrollment_date: String,
    pub avatar: String,
}

/// Placeholder avatar derived from the student's name, same service and
/// palette the seed roster uses. Spaces become '+', anything else outside
/// the unreserved set is percent-encoded.
pub fn placeholder_avatar(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=6366F1&color=fff",
        encode_query_component(name)
    )
}

fn encode_query_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b' ' => out.push('+'),
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

fn seed(
    id: &str,
    name: &str,
    email: &str,
    course: &str,
    grade: &str,
    enrollment_date: &str,
) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        course: course.to_string(),
        grade: grade.to_string(),
        enrollment_date: enrollment_date.to_string(),
        avatar: placeholder_avatar(name),
        user_id: SEED_OWNER.to_string(),
        created_at: None,
    }
}

/// The built-in example roster. Always visible to any caller, signed in or
/// not, and immutable. Ids are fixed literals so the detail view works
/// without a workspace. Note "Business" predates the course enumeration and
/// deliberately stays outside it.
pub fn seed_students() -> Vec<Student> {
    vec![
        seed("1", "John Doe", "john@example.com", "Computer Science", "A", "2023-01-15"),
        seed("2", "Jane Smith", "jane@example.com", "Engineering", "B+", "2023-02-20"),
        seed("3", "Alex Johnson", "alex@example.com", "Business", "A-", "2023-03-10"),
        seed("4", "Emily Wilson", "emily.w@example.com", "Chemistry", "B", "2023-08-10"),
        seed("5", "Michael Brown", "michael@example.com", "Biology", "A+", "2023-09-10"),
        seed("6", "Sarah Davi", "sarah@example.com", "Engineering", "A-", "2023-08-17"),
    ]
}
