// Test Fixtures
// Known-good primes and group parameters so cipher tests skip prime search

use num_bigint::BigUint;

fn from_hex(hex: &str) -> BigUint {
    BigUint::parse_bytes(hex.as_bytes(), 16).unwrap()
}

/// Two 512-bit primes whose product is a 1023-bit modulus
pub fn rsa_1024_primes() -> (BigUint, BigUint) {
    (
        from_hex(
            "8f12fa68bf66f1de2270a6372c15e0dcf6e82a8f0c621873489bf79a3d3bc942\
             dd1e7e4b0f3fb3346a749103a62f19aee49d08671268624e2f47392159621af1",
        ),
        from_hex(
            "bba08f8d14bdb5c8a1af43732a3a8a3f177116e660c51b07f305da651fa1101b\
             535daa4bb45b29078e57ff2509b2b0a0fa8308f4bfd58231ce98546c8354fefd",
        ),
    )
}

/// Two 1024-bit primes whose product is a 2047-bit modulus
pub fn rsa_2048_primes() -> (BigUint, BigUint) {
    (
        from_hex(
            "97f11f47fb793c58668fe46736687247370db111ba37639170ec26467384132a\
             993c0e2feba7e326e9154611317238e66f7a8c48e80714c4fb45015b7b6e81f0\
             31b55553d04a17556f860d59f0e3d6c2655b5a1079ea6acb97e02238daa63df0\
             20e818e6a553cc216d27d2bb7e5eaad7cc33b3e673618c86fcbfeaabb5af91c9",
        ),
        from_hex(
            "ce3ace02ba41d151ed3d48e98204c5daa80346782c9c9451582ba059129700ce\
             2d7e8d12ac11802dacc77f4da40e3353469e89b2947fe52436a0af2c7033b1fc\
             00e9b65ae2baa4e9475ee6cd25c0ee8ad7762bf0289fbfaa165d325ef90b4e37\
             375640cac798abb7e439ccac01c277433f1210635c1ef58761c2bfd9c239a729",
        ),
    )
}

/// 256-bit safe prime group: (p, g, x, h) with h = g^x mod p
pub fn elgamal_256() -> (BigUint, BigUint, BigUint, BigUint) {
    (
        from_hex("c998ff967972196995c8de6284b5bf11a36ae4d26bd3767468e33bd0e61a5a7f"),
        BigUint::from(5u8),
        from_hex("23f72218796f474e7c9861519386be3dc6d09b39f1241522d2b2269b15e6ad9f"),
        from_hex("7dc86903957588948d0afcfa99ea9c5203053bec7f35028b9b69c177bd4e372f"),
    )
}
