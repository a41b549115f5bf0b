//! Protocol constants.

/// Size of one protocol word in bytes (256 bits).
pub const WORD_BYTES: usize = 32;

/// Number of words in a post body.
pub const BODY_WORDS: usize = 32;

/// Post body size in bytes (1 KiB of opaque payload).
pub const BODY_BYTES: usize = BODY_WORDS * WORD_BYTES;

/// Binary size of a post on the wire: body, then work, then prev.
pub const POST_WIRE_BYTES: usize = BODY_BYTES + 2 * WORD_BYTES;

/// Largest hex payload a peer may send: a tagged `SharePost` datagram.
///
/// 1 tag byte plus the post binary, hex-doubled. Larger datagrams are
/// rejected before decoding.
pub const MAX_DATAGRAM_HEX: usize = 2 * (1 + POST_WIRE_BYTES);

/// Receive buffer size for a single datagram. Comfortably above
/// [`MAX_DATAGRAM_HEX`] so oversize input is observed, not truncated.
pub const RECV_BUFFER_BYTES: usize = 4096;

/// Ports of the hardcoded localhost seed peers.
pub const SEED_PORTS: [u16; 4] = [42000, 42001, 42002, 42003];

/// Event loop cadence: the dispatcher sleeps this long between ticks.
pub const TICK_INTERVAL_MS: u64 = 25;

/// Nonce attempts per tick when the mining mode is enabled. Bounds the
/// time a tick spends hashing so the gossip cadence holds.
pub const MINE_ATTEMPTS_PER_TICK: u64 = 2048;

/// Default mining difficulty, expressed as a score exponent: a candidate
/// qualifies when its local score reaches `2^DEFAULT_MINE_BITS`.
pub const DEFAULT_MINE_BITS: usize = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_one_kilobyte() {
        assert_eq!(BODY_BYTES, 1024);
    }

    #[test]
    fn share_post_fits_the_datagram_budget() {
        // tag + 32 body words + work + prev = 1089 bytes, 2178 hex chars
        assert_eq!(MAX_DATAGRAM_HEX, 2178);
        assert!(MAX_DATAGRAM_HEX < RECV_BUFFER_BYTES);
    }

    #[test]
    fn seed_ports_are_distinct() {
        for (i, a) in SEED_PORTS.iter().enumerate() {
            for b in &SEED_PORTS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
