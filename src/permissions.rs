//! Which actions the dashboard offers to a user. These checks only decide
//! what is shown; the session applies mutations regardless of role.

use crate::{AccessLevel, FileRecord, Role, User};

pub fn can_edit(user: &User, file: &FileRecord) -> bool {
    match user.role {
        Role::Admin => true,
        Role::Editor => matches!(file.access_level, AccessLevel::Edit | AccessLevel::Admin),
        Role::Viewer => false,
    }
}

pub fn can_delete(user: &User, file: &FileRecord) -> bool {
    user.role == Role::Admin || file.uploaded_by == user.email
}

pub fn can_manage_users(user: &User) -> bool {
    user.role == Role::Admin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileId;
    use chrono::Utc;

    fn user(email: &str, role: Role) -> User {
        User {
            id: email.to_string(),
            email: email.to_string(),
            name: email.to_string(),
            role,
            avatar: None,
        }
    }

    fn file(uploaded_by: &str, access_level: AccessLevel) -> FileRecord {
        FileRecord {
            id: FileId::new("1"),
            name: "f".to_string(),
            size: 0,
            file_type: "text/plain".to_string(),
            uploaded_at: Utc::now(),
            uploaded_by: uploaded_by.to_string(),
            version: 1,
            tags: vec![],
            shared: false,
            access_level,
            download_count: 0,
        }
    }

    #[test]
    fn test_can_edit() {
        let admin = user("a@x", Role::Admin);
        let editor = user("e@x", Role::Editor);
        let viewer = user("v@x", Role::Viewer);

        assert!(can_edit(&admin, &file("z@x", AccessLevel::View)));
        assert!(can_edit(&editor, &file("z@x", AccessLevel::Edit)));
        assert!(can_edit(&editor, &file("z@x", AccessLevel::Admin)));
        assert!(!can_edit(&editor, &file("z@x", AccessLevel::View)));
        assert!(!can_edit(&viewer, &file("z@x", AccessLevel::Admin)));
    }

    #[test]
    fn test_can_delete() {
        let viewer = user("v@x", Role::Viewer);
        assert!(can_delete(&viewer, &file("v@x", AccessLevel::View)));
        assert!(!can_delete(&viewer, &file("z@x", AccessLevel::Admin)));
        assert!(can_delete(&user("a@x", Role::Admin), &file("z@x", AccessLevel::View)));
        assert!(!can_delete(&user("e@x", Role::Editor), &file("z@x", AccessLevel::Edit)));
    }

    #[test]
    fn test_can_manage_users() {
        assert!(can_manage_users(&user("a@x", Role::Admin)));
        assert!(!can_manage_users(&user("e@x", Role::Editor)));
    }
}
