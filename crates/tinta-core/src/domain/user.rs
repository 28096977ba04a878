use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - a registered account.
///
/// `username` and `email` are globally unique; the schema enforces both.
/// The password is only ever held as a salted hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub last_name: String,
    pub first_name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub avatar: Option<String>,
    pub about: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted by the personal-account form. All of them overwrite the
/// stored values unconditionally except `date_of_birth`, which is `None`
/// both for "not submitted" and "did not parse" - in either case the stored
/// value is left alone.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub about: String,
    pub date_of_birth: Option<NaiveDate>,
}

impl User {
    /// Create a new user from registration input. Text fields are trimmed
    /// here so every caller gets the same normalization.
    pub fn register(
        last_name: &str,
        first_name: &str,
        username: &str,
        email: &str,
        phone: &str,
        city: &str,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            last_name: last_name.trim().to_owned(),
            first_name: first_name.trim().to_owned(),
            username: username.trim().to_owned(),
            email: email.trim().to_owned(),
            phone: phone.trim().to_owned(),
            city: city.trim().to_owned(),
            date_of_birth: None,
            password_hash,
            avatar: None,
            about: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a profile-form submission.
    pub fn apply_profile(&mut self, changes: ProfileChanges) {
        self.first_name = changes.first_name;
        self.last_name = changes.last_name;
        self.city = changes.city;
        self.about = Some(changes.about);
        if let Some(dob) = changes.date_of_birth {
            self.date_of_birth = Some(dob);
        }
        self.touch();
    }

    pub fn set_password_hash(&mut self, hash: String) {
        self.password_hash = hash;
        self.touch();
    }

    pub fn set_email(&mut self, email: String) {
        self.email = email;
        self.touch();
    }

    pub fn set_phone(&mut self, phone: String) {
        self.phone = phone;
        self.touch();
    }

    pub fn set_avatar(&mut self, filename: String) {
        self.avatar = Some(filename);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Split a single full-name field on the first whitespace run. No whitespace
/// means everything is the first name and the last name comes back empty.
pub fn split_full_name(full_name: &str) -> (String, String) {
    let trimmed = full_name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_owned(), rest.trim_start().to_owned()),
        None => (trimmed.to_owned(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_trims_text_fields() {
        let user = User::register(
            "  Doe ",
            " Jane",
            " jane ",
            " jane@example.com ",
            " 555-0100 ",
            " Springfield ",
            "hash".to_owned(),
        );

        assert_eq!(user.last_name, "Doe");
        assert_eq!(user.first_name, "Jane");
        assert_eq!(user.username, "jane");
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.phone, "555-0100");
        assert_eq!(user.city, "Springfield");
        assert!(user.avatar.is_none());
        assert!(user.date_of_birth.is_none());
    }

    #[test]
    fn split_full_name_on_first_whitespace() {
        assert_eq!(
            split_full_name("Jane Doe"),
            ("Jane".to_owned(), "Doe".to_owned())
        );
        assert_eq!(
            split_full_name("Jane van der Berg"),
            ("Jane".to_owned(), "van der Berg".to_owned())
        );
    }

    #[test]
    fn split_full_name_without_whitespace_leaves_last_name_empty() {
        assert_eq!(split_full_name("Jane"), ("Jane".to_owned(), String::new()));
    }

    #[test]
    fn apply_profile_keeps_birthdate_when_absent() {
        let mut user = User::register("Doe", "Jane", "jane", "j@e.com", "1", "X", "h".into());
        let dob = NaiveDate::from_ymd_opt(1990, 4, 2).unwrap();
        user.date_of_birth = Some(dob);

        user.apply_profile(ProfileChanges {
            first_name: "Janet".to_owned(),
            last_name: "Doe".to_owned(),
            city: "Shelbyville".to_owned(),
            about: "hi".to_owned(),
            date_of_birth: None,
        });

        assert_eq!(user.first_name, "Janet");
        assert_eq!(user.city, "Shelbyville");
        assert_eq!(user.about.as_deref(), Some("hi"));
        assert_eq!(user.date_of_birth, Some(dob));
    }
}
