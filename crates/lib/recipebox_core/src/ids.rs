// Recipe identifiers.
//
// Ids are opaque to clients: 32 lowercase hex characters rendered from a
// random (v4) UUID. Nothing sorts or parses them.

use uuid::Uuid;

/// Generate a fresh recipe id.
pub fn new_recipe_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn recipe_id_is_fixed_length_hex() {
        let id = new_recipe_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn recipe_id_is_random_uuid() {
        let id = Uuid::parse_str(&new_recipe_id()).unwrap();
        assert_eq!(id.get_version(), Some(uuid::Version::Random));
    }

    #[test]
    fn recipe_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| new_recipe_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
