//! URL fragment synchronization.

use folio_platform::HistoryService;
use folio_types::SectionId;
use folio_types::error::Result;

/// Fragment for an element id: blank for `home` (or an empty id),
/// `#<id>` otherwise.
pub fn hash_for(id: &str) -> String {
    let id = id.trim();
    if id.is_empty() || id == SectionId::Home.as_str() {
        String::new()
    } else {
        format!("#{id}")
    }
}

/// Replace the current history entry's fragment with the one for `id`.
///
/// Always a replace: the back/forward stack never grows, the page does not
/// reload, and the scroll position is left alone.
pub fn update_url_hash<H>(history: &mut H, id: &str) -> Result<()>
where
    H: HistoryService + ?Sized,
{
    let hash = hash_for(id);
    log::debug!("URL fragment -> {:?}", hash);
    history.replace_hash(&hash)
}
