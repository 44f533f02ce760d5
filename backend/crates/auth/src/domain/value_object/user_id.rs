use kernel::id::Id;

pub struct UserMarker;
pub type UserId = Id<UserMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_from_i64() {
        let user_id = UserId::from_i64(7);
        assert_eq!(user_id.as_i64(), 7);
        assert_eq!(user_id.to_string(), "7");
    }

    #[test]
    fn test_user_id_parse() {
        assert_eq!("42".parse::<UserId>(), Ok(UserId::from_i64(42)));
        assert!("not-a-number".parse::<UserId>().is_err());
    }
}
