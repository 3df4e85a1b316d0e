const PAGE_PREFIX: &str = "<html><head></head><body>";
const PAGE_SUFFIX: &str = "</body></html>";

/// Puts a rendered fragment inside a bare html/head/body shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageWrapper;

impl PageWrapper {
    pub fn new() -> Self {
        Self
    }

    pub fn wrap(&self, fragment: &str) -> String {
        let mut page = String::with_capacity(PAGE_PREFIX.len() + fragment.len() + PAGE_SUFFIX.len());
        page.push_str(PAGE_PREFIX);
        page.push_str(fragment);
        page.push_str(PAGE_SUFFIX);
        page
    }
}
