pub const DEFAULT_PAGE_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1 起算；小於等於 0 時從第一筆開始
    pub page: i64,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(page: i64, limit: usize) -> Self {
        Self { page, limit }
    }

    pub fn skip(&self) -> usize {
        if self.page <= 0 {
            return 0;
        }

        let skip = (self.page as u64 - 1).saturating_mul(self.limit as u64);
        usize::try_from(skip).unwrap_or(usize::MAX)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub current_page: i64,
    pub total_pages: usize,
    pub total: usize,
    pub has_more: bool,
}

pub fn paginate<T>(items: &[T], request: PageRequest) -> Page<'_, T> {
    let limit = request.limit.max(1);
    let total = items.len();
    let skip = PageRequest::new(request.page, limit).skip();
    let end = skip.saturating_add(limit);

    let slice = if skip >= total {
        &items[0..0]
    } else {
        &items[skip..end.min(total)]
    };

    Page {
        items: slice,
        current_page: request.page,
        total_pages: total.div_ceil(limit),
        total,
        has_more: end < total,
    }
}

/// 解析 `page` 查詢參數：取開頭的整數部分 (`0x` 前綴以十六進位解讀)，
/// 無法解析或為 0 時視為第 1 頁
pub fn parse_page(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 1;
    };

    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            break;
        };
        seen_digit = true;
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(digit));
    }

    match (seen_digit, value) {
        (false, _) | (true, 0) => 1,
        (true, v) if negative => -v,
        (true, v) => v,
    }
}
