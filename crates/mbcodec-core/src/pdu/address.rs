use crate::NumberOutOfRange;
use core::fmt;

/// Modbus server (slave) address. `0` is broadcast, `1..=247` are unicast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct ServerAddress(u8);

impl ServerAddress {
    pub const BROADCAST: Self = Self(0);
    pub const MAX: u8 = 247;

    pub fn new(value: u8) -> Result<Self, NumberOutOfRange> {
        NumberOutOfRange::check("server address", value, 0, Self::MAX).map(Self)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn is_broadcast(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for ServerAddress {
    type Error = NumberOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServerAddress> for u8 {
    fn from(value: ServerAddress) -> Self {
        value.0
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::ServerAddress;

    #[test]
    fn accepts_broadcast_and_unicast() {
        assert!(ServerAddress::new(0).unwrap().is_broadcast());
        assert_eq!(ServerAddress::new(247).unwrap().get(), 247);
    }

    #[test]
    fn rejects_reserved_addresses() {
        let err = ServerAddress::new(248).unwrap_err();
        assert_eq!(err.field, "server address");
        assert_eq!(err.value, 248);
        assert!(ServerAddress::try_from(255).is_err());
    }
}
