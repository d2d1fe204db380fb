use crate::encoding::{ModbusInput, ModbusOutput};
use crate::pdu::ServerAddress;
use crate::{DecodeError, EncodeError};

/// Payload codec shared by every request and response type.
///
/// `decode_payload` fills an existing value in place so the dispatcher can
/// build a shell first and let the variant consume exactly its own bytes.
/// On error the value is left as it was before the call.
pub trait PduBody {
    /// Function-code byte as it appears on the wire.
    fn function_code(&self) -> u8;

    /// Number of payload bytes after the function code.
    fn payload_size(&self) -> usize;

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError>;

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError>;
}

/// A server address plus one payload.
///
/// The address is fixed once the message exists and the function code is
/// always the payload's own, so the header can never disagree with the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message<P> {
    server_address: ServerAddress,
    pdu: P,
}

impl<P> Message<P> {
    pub fn new(server_address: ServerAddress, pdu: P) -> Self {
        Self {
            server_address,
            pdu,
        }
    }

    pub fn server_address(&self) -> ServerAddress {
        self.server_address
    }

    pub fn pdu(&self) -> &P {
        &self.pdu
    }

    pub fn pdu_mut(&mut self) -> &mut P {
        &mut self.pdu
    }

    pub fn into_pdu(self) -> P {
        self.pdu
    }

    /// Re-wraps the payload, e.g. a typed request into a [`crate::pdu::Request`].
    pub fn convert<Q: From<P>>(self) -> Message<Q> {
        Message {
            server_address: self.server_address,
            pdu: Q::from(self.pdu),
        }
    }
}

impl<P: Default> Message<P> {
    /// An empty message waiting for [`Message::decode_payload`].
    pub fn shell(server_address: ServerAddress) -> Self {
        Self::new(server_address, P::default())
    }
}

impl<P: PduBody> Message<P> {
    pub fn function_code(&self) -> u8 {
        self.pdu.function_code()
    }

    pub fn payload_size(&self) -> usize {
        self.pdu.payload_size()
    }

    /// Function code plus payload.
    pub fn pdu_size(&self) -> usize {
        1 + self.payload_size()
    }

    /// Server address, function code and payload; what transport framing wraps.
    pub fn encoded_size(&self) -> usize {
        2 + self.payload_size()
    }

    pub fn encode<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_u8(self.server_address.get())?;
        w.write_u8(self.pdu.function_code())?;
        self.pdu.encode_payload(w)
    }

    pub fn encode_to_vec(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::with_capacity(self.encoded_size());
        self.encode(&mut out)?;
        Ok(out)
    }

    pub fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        self.pdu.decode_payload(r)
    }
}

/// Declares a tagged union of payload types and forwards [`PduBody`] to the
/// active variant.
macro_rules! pdu_union {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident($ty:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum $name {
            $($variant($ty)),+
        }

        impl $crate::pdu::PduBody for $name {
            fn function_code(&self) -> u8 {
                match self {
                    $(Self::$variant(pdu) => pdu.function_code()),+
                }
            }

            fn payload_size(&self) -> usize {
                match self {
                    $(Self::$variant(pdu) => pdu.payload_size()),+
                }
            }

            fn encode_payload<W: $crate::encoding::ModbusOutput + ?Sized>(
                &self,
                w: &mut W,
            ) -> Result<(), $crate::EncodeError> {
                match self {
                    $(Self::$variant(pdu) => pdu.encode_payload(w)),+
                }
            }

            fn decode_payload<R: $crate::encoding::ModbusInput + ?Sized>(
                &mut self,
                r: &mut R,
            ) -> Result<(), $crate::DecodeError> {
                match self {
                    $(Self::$variant(pdu) => pdu.decode_payload(r)),+
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(pdu: $ty) -> Self {
                    Self::$variant(pdu)
                }
            }

            impl TryFrom<$name> for $ty {
                type Error = $name;

                fn try_from(value: $name) -> Result<Self, Self::Error> {
                    match value {
                        $name::$variant(pdu) => Ok(pdu),
                        #[allow(unreachable_patterns)]
                        other => Err(other),
                    }
                }
            }
        )+
    };
}

pub(crate) use pdu_union;

pub(crate) fn pack_bits(values: &[bool]) -> Vec<u8> {
    let mut packed = vec![0u8; values.len().div_ceil(8)];
    for (i, value) in values.iter().enumerate() {
        if *value {
            packed[i / 8] |= 1u8 << (i % 8);
        }
    }
    packed
}

pub(crate) fn bit_at(packed: &[u8], index: usize) -> Option<bool> {
    let byte = packed.get(index / 8)?;
    Some((byte & (1u8 << (index % 8))) != 0)
}

pub(crate) fn unpack_bits(packed: &[u8], count: usize) -> Vec<bool> {
    (0..count)
        .map(|i| bit_at(packed, i).unwrap_or(false))
        .collect()
}

pub(crate) fn read_registers<R: ModbusInput + ?Sized>(
    r: &mut R,
    count: usize,
) -> Result<Vec<u16>, DecodeError> {
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(r.read_be_u16()?);
    }
    Ok(values)
}

pub(crate) fn write_registers<W: ModbusOutput + ?Sized>(
    w: &mut W,
    values: &[u16],
) -> Result<(), EncodeError> {
    for value in values {
        w.write_be_u16(*value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{bit_at, pack_bits, unpack_bits};

    #[test]
    fn packs_lsb_first() {
        let packed = pack_bits(&[true, false, true, true, false, false, true, false, true]);
        assert_eq!(packed, vec![0b0100_1101, 0b0000_0001]);
        assert_eq!(bit_at(&packed, 8), Some(true));
        assert_eq!(bit_at(&packed, 16), None);
        assert_eq!(unpack_bits(&packed, 3), vec![true, false, true]);
    }
}
