use hashcracker::{Alphabet, SearchSpace};
use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if data.len() < 9 {
                return;
            }
            let length = (data[0] % 16) as usize;
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&data[1..9]);
            let index = u64::from_le_bytes(raw);
            let Ok(chars) = std::str::from_utf8(&data[9..]) else {
                return;
            };
            let Ok(alphabet) = Alphabet::new(chars) else {
                return;
            };
            let Ok(space) = SearchSpace::new(&alphabet, length, u64::MAX) else {
                return;
            };
            if let Ok(candidate) = space.decode(index) {
                assert_eq!(space.encode(&candidate), Some(index));
            }
        });
    }
}
