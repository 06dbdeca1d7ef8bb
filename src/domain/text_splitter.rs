//! 文本分块器
//!
//! 将超长文本切分为不超过最大字符数的连续片段，供翻译逐块调用。
//! 长度与切分点均按 Unicode 字符计算，不会切断多字节字符。

/// 默认最大分块字符数
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 20_000;

/// 在窗口末尾多大比例内搜索分隔符（1/10）
const SEARCH_WINDOW_DIVISOR: usize = 10;

/// 分块后的文本片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub content: String,
}

impl Chunk {
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// 将文本切分为有序片段
///
/// 分块策略：
/// 1. 文本不超过 `max_chars` 时整体作为一个片段
/// 2. 否则在当前窗口的最后 10% 内依次查找最后一个换行、句号、空格，
///    在分隔符之后切分（分隔符保留在前一片段末尾）
/// 3. 搜索区内没有任何分隔符时，在 `max_chars` 处硬切
///
/// 所有片段按顺序拼接后与原文完全一致。空文本返回一个空片段。
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<Chunk> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    loop {
        // 第 max_chars 个字符的字节偏移即窗口终点；不存在说明剩余部分已足够短
        let window_end = match rest.char_indices().nth(max_chars) {
            Some((offset, _)) => offset,
            None => {
                chunks.push(Chunk {
                    index: chunks.len(),
                    content: rest.to_string(),
                });
                break;
            }
        };

        let split_at = find_split_point(&rest[..window_end], max_chars).unwrap_or(window_end);

        chunks.push(Chunk {
            index: chunks.len(),
            content: rest[..split_at].to_string(),
        });
        rest = &rest[split_at..];
    }

    chunks
}

/// 在窗口尾部搜索区内查找切分点，返回分隔符之后的字节偏移
fn find_split_point(window: &str, window_chars: usize) -> Option<usize> {
    let search_chars = window_chars / SEARCH_WINDOW_DIVISOR;
    if search_chars == 0 {
        return None;
    }

    let search_start = window
        .char_indices()
        .nth(window_chars - search_chars)
        .map(|(offset, _)| offset)?;
    let search_area = &window[search_start..];

    // 分隔符均为单字节 ASCII，+1 即跳过分隔符本身
    ['\n', '.', ' ']
        .iter()
        .find_map(|delimiter| search_area.rfind(*delimiter))
        .map(|pos| search_start + pos + 1)
}
