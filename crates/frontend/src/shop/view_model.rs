use crate::shared::format::format_currency;
use contracts::shop::{Item, PlaceOrderRequest};

/// Number of pages for `len` items; never less than one
pub fn total_pages(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page.max(1)).max(1)
}

/// Integer parse of free-form quantity input, clamped to `[1, max_qty]`.
///
/// Only the leading integer is read (`"3.9"` is 3, `" 12abc"` is 12);
/// anything without one counts as 1.
pub fn parse_quantity(raw: &str, max_qty: u32) -> u32 {
    let max = i64::from(max_qty.max(1));
    parse_leading_int(raw).unwrap_or(1).clamp(1, max) as u32
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    // Overlong digit runs saturate instead of failing
    let magnitude = rest[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

// ============================================================================
// Catalog
// ============================================================================

/// Paginated view over the last catalog the host returned
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    items: Vec<Item>,
    /// 1-based
    page: usize,
    per_page: usize,
}

impl CatalogState {
    pub fn new(per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            per_page: per_page.max(1) as usize,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.items.len(), self.per_page)
    }

    /// Replace the whole list and go back to the first page
    pub fn set_catalog(&mut self, items: Vec<Item>) {
        self.items = items;
        self.page = 1;
    }

    /// Move by `delta` pages, clamped to `[1, total_pages]`
    pub fn set_page(&mut self, delta: i64) {
        let total = self.total_pages() as i64;
        let target = (self.page as i64).saturating_add(delta);
        self.page = target.clamp(1, total) as usize;
    }

    /// Items on the current page
    pub fn visible_slice(&self) -> &[Item] {
        let start = (self.page - 1).saturating_mul(self.per_page);
        if start >= self.items.len() {
            return &[];
        }
        let end = start.saturating_add(self.per_page).min(self.items.len());
        &self.items[start..end]
    }

    pub fn page_label(&self) -> String {
        format!("Page {}/{}", self.page, self.total_pages())
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

// ============================================================================
// Selection
// ============================================================================

/// The item currently being ordered and its quantity
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    selected: Option<Item>,
    quantity: u32,
    max_qty: u32,
}

impl SelectionState {
    pub fn new(max_qty: u32) -> Self {
        Self {
            selected: None,
            quantity: 1,
            max_qty: max_qty.max(1),
        }
    }

    pub fn selected(&self) -> Option<&Item> {
        self.selected.as_ref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn max_qty(&self) -> u32 {
        self.max_qty
    }

    pub fn select(&mut self, item: Item) {
        self.selected = Some(item);
        self.quantity = 1;
    }

    /// Normalize raw input into the quantity; returns the stored value
    pub fn set_quantity(&mut self, raw: &str) -> u32 {
        self.quantity = parse_quantity(raw, self.max_qty);
        self.quantity
    }

    pub fn cancel(&mut self) {
        self.selected = None;
        self.quantity = 1;
    }

    /// `price * quantity` of the selected item
    pub fn compute_total(&self) -> Option<f64> {
        self.selected
            .as_ref()
            .map(|item| item.price * f64::from(self.quantity))
    }

    /// Order payload for the current selection, amount re-clamped
    pub fn order_request(&self) -> Option<PlaceOrderRequest> {
        self.selected.as_ref().map(|item| PlaceOrderRequest {
            name: item.name.clone(),
            amount: self.quantity.clamp(1, self.max_qty),
        })
    }

    pub fn modal_title(&self, currency_symbol: &str) -> Option<String> {
        self.selected.as_ref().map(|item| {
            format!(
                "{} ({} each)",
                item.label,
                format_currency(item.price, currency_symbol)
            )
        })
    }

    pub fn total_label(&self, currency_symbol: &str) -> Option<String> {
        self.compute_total()
            .map(|total| format!("{} total", format_currency(total, currency_symbol)))
    }
}
