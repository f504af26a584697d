//! Group list and per-group channel projection.
//!
//! Both lists are derived on demand from the master channel list; nothing
//! here caches what the UI last drew.

use crate::favorites::Favorites;
use crate::model::{Channel, FAVORITES_GROUP};

/// `FAVORITES` followed by every distinct `group_title`, first-seen order.
pub fn group_list(channels: &[Channel]) -> Vec<String> {
    let mut groups = vec![FAVORITES_GROUP.to_string()];
    for channel in channels {
        if !groups[1..].iter().any(|g| *g == channel.group_title) {
            groups.push(channel.group_title.clone());
        }
    }
    groups
}

/// Channels shown for `group`, in master-list order.
///
/// `FAVORITES` lists favorite channels; any other label matches
/// `group_title` exactly (case-sensitive).
pub fn visible_channels<'a>(
    channels: &'a [Channel],
    group: &str,
    favorites: &Favorites,
) -> Vec<&'a Channel> {
    if group == FAVORITES_GROUP {
        channels.iter().filter(|c| favorites.contains(&c.id)).collect()
    } else {
        channels.iter().filter(|c| c.group_title == group).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(id: &str, group: &str) -> Channel {
        Channel {
            id: id.to_string(),
            number: 0,
            name: id.to_uppercase(),
            group_title: group.to_string(),
            logo: String::new(),
            tvg_id: None,
            stream_url: format!("http://s/{id}"),
        }
    }

    #[test]
    fn test_group_list_favorites_first_then_first_seen() {
        let channels = vec![ch("a", "News"), ch("b", "Sports"), ch("c", "News"), ch("d", "news")];
        assert_eq!(group_list(&channels), vec!["FAVORITES", "News", "Sports", "news"]);
    }

    #[test]
    fn test_group_list_of_empty_playlist() {
        assert_eq!(group_list(&[]), vec!["FAVORITES"]);
    }

    #[test]
    fn test_exact_case_sensitive_match() {
        let channels = vec![ch("a", "News"), ch("b", "news"), ch("c", "News ")];
        let visible = visible_channels(&channels, "News", &Favorites::new());
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_favorites_in_master_order() {
        let channels = vec![ch("a", "X"), ch("b", "Y"), ch("c", "Z")];
        let mut favs = Favorites::new();
        favs.toggle("c");
        favs.toggle("a");
        let visible = visible_channels(&channels, FAVORITES_GROUP, &favs);
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_empty_favorites_yield_empty_list() {
        let channels: Vec<Channel> = (0..50).map(|i| ch(&i.to_string(), "All")).collect();
        assert!(visible_channels(&channels, FAVORITES_GROUP, &Favorites::new()).is_empty());
    }
}
