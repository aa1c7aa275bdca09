use hashcracker::{Alphabet, SearchParameters};
use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let Ok(text) = std::str::from_utf8(data) else {
                return;
            };
            let cut = text.char_indices().nth(64).map_or(text.len(), |(i, _)| i);
            let (hash, rest) = text.split_at(cut);
            let Ok(alphabet) = Alphabet::new(rest) else {
                return;
            };
            let _ = SearchParameters::new(hash, "salt", 4, alphabet);
        });
    }
}
