/// 기본 페이지 번호
pub const DEFAULT_PAGE: u32 = 1;
/// 기본 페이지 크기
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// 1부터 시작하는 페이지 번호와 페이지 크기
///
/// 저장소에서는 `skip = (page - 1) * page_size`, `limit = page_size`로 변환됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: u32,
}

impl Pagination {
    /// 0인 값은 기본값(page 1, size 15)으로 대체합니다.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}
