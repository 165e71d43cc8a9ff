// ABOUTME: Paragraph packing - splits documents into chunks of bounded size.
// ABOUTME: Paragraphs are kept whole when they fit; longer ones split on whitespace.

use super::Document;

/// Split every document into chunks of at most `chunk_size` characters.
///
/// Consecutive paragraphs are packed together while they fit. Each chunk
/// carries its document's metadata plus a `chunk` ordinal.
pub fn chunk_documents(documents: &[Document], chunk_size: usize) -> Vec<Document> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::new();

    for doc in documents {
        for (i, content) in pack(&doc.content, chunk_size).into_iter().enumerate() {
            let mut chunk = Document {
                content,
                metadata: doc.metadata.clone(),
            };
            chunk.metadata.insert("chunk".to_string(), i.to_string());
            chunks.push(chunk);
        }
    }
    chunks
}

fn pack(text: &str, chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
        for piece in split_long(paragraph, chunk_size) {
            let needed = if current.is_empty() {
                piece.chars().count()
            } else {
                current.chars().count() + 2 + piece.chars().count()
            };
            if needed > chunk_size && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(&piece);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Split a paragraph into word-aligned pieces of at most `chunk_size`
/// characters. A single word longer than that becomes its own piece.
fn split_long(paragraph: &str, chunk_size: usize) -> Vec<String> {
    if paragraph.chars().count() <= chunk_size {
        return vec![paragraph.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    for word in paragraph.split_whitespace() {
        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if needed > chunk_size && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}
