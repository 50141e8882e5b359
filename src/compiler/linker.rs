use crate::project::Resource;

/// Identifier used for a symbolic reference that resolves to nothing.
/// Downstream consumers read it as "no association".
pub const NO_RESOURCE: i32 = -1;

/// Resolve a symbolic name against one resource collection.
///
/// Scans in collection order and returns the id of the first resource whose
/// name matches exactly, case-sensitively. A miss is not an error: objects
/// without a sprite, views without a followed object and the like encode the
/// absence as an empty name, which matches nothing and yields
/// [`NO_RESOURCE`] like any other dangling reference.
pub fn resolve_id<R: Resource>(collection: &[R], name: &str) -> i32 {
    collection
        .iter()
        .find(|resource| resource.name() == name)
        .map(Resource::id)
        .unwrap_or(NO_RESOURCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Sprite;

    fn sprites() -> Vec<Sprite> {
        vec![
            Sprite {
                name: "spr_player".to_string(),
                id: 3,
                ..Sprite::default()
            },
            Sprite {
                name: "spr_wall".to_string(),
                id: 7,
                ..Sprite::default()
            },
        ]
    }

    #[test]
    fn test_resolves_matching_name_to_id() {
        assert_eq!(resolve_id(&sprites(), "spr_player"), 3);
        assert_eq!(resolve_id(&sprites(), "spr_wall"), 7);
    }

    #[test]
    fn test_unknown_name_yields_sentinel() {
        assert_eq!(resolve_id(&sprites(), "spr_missing"), NO_RESOURCE);
    }

    #[test]
    fn test_empty_name_yields_sentinel() {
        assert_eq!(resolve_id(&sprites(), ""), NO_RESOURCE);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(resolve_id(&sprites(), "SPR_PLAYER"), NO_RESOURCE);
    }

    #[test]
    fn test_first_match_wins() {
        let mut collection = sprites();
        collection.push(Sprite {
            name: "spr_player".to_string(),
            id: 99,
            ..Sprite::default()
        });
        assert_eq!(resolve_id(&collection, "spr_player"), 3);
    }

    #[test]
    fn test_empty_collection_yields_sentinel() {
        let collection: Vec<Sprite> = Vec::new();
        assert_eq!(resolve_id(&collection, "spr_player"), NO_RESOURCE);
    }
}
