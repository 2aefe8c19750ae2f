//! TGI (type/group/instance) resource keys

use std::fmt;
use std::io::{Read, Seek};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::cursor::DbpfRead;
use crate::error::{Error, Result};

/// A 32-bit key component, displayed as 8 uppercase hex digits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hex32(pub u32);

impl fmt::Display for Hex32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl From<u32> for Hex32 {
    fn from(value: u32) -> Self {
        Hex32(value)
    }
}

impl FromStr for Hex32 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() || digits.len() > 8 {
            return Err(Error::InvalidKey(format!("'{s}' is not a 32-bit hex value")));
        }
        u32::from_str_radix(digits, 16)
            .map(Hex32)
            .map_err(|_| Error::InvalidKey(format!("'{s}' is not a 32-bit hex value")))
    }
}

impl Serialize for Hex32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Instance id of a resource: one word, or two words for high-instance packages
///
/// Words are stored in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId {
    pub leading: Hex32,
    pub trailing: Option<Hex32>,
}

impl InstanceId {
    #[must_use]
    pub fn single(word: Hex32) -> Self {
        Self {
            leading: word,
            trailing: None,
        }
    }

    #[must_use]
    pub fn pair(leading: Hex32, trailing: Hex32) -> Self {
        Self {
            leading,
            trailing: Some(trailing),
        }
    }

    /// Numeric value of the displayed hex digits
    #[must_use]
    pub fn value(&self) -> u64 {
        match self.trailing {
            Some(trailing) => (u64::from(self.leading.0) << 32) | u64::from(trailing.0),
            None => u64::from(self.leading.0),
        }
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.leading)?;
        if let Some(trailing) = self.trailing {
            write!(f, "{trailing}")?;
        }
        Ok(())
    }
}

/// Identity of a resource inside a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TgiKey {
    pub type_id: Hex32,
    pub group_id: Hex32,
    pub instance_id: InstanceId,
}

impl TgiKey {
    #[must_use]
    pub fn new(type_id: Hex32, group_id: Hex32, instance_id: InstanceId) -> Self {
        Self {
            type_id,
            group_id,
            instance_id,
        }
    }
}

impl fmt::Display for TgiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.type_id, self.group_id, self.instance_id)
    }
}

impl FromStr for TgiKey {
    type Err = Error;

    /// Parse `TTTTTTTT:GGGGGGGG:IIIIIIII` (instance may have 16 digits)
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        let [type_id, group_id, instance] = parts.as_slice() else {
            return Err(Error::InvalidKey(format!(
                "expected TYPE:GROUP:INSTANCE, got '{s}'"
            )));
        };

        if !instance.is_ascii() {
            return Err(Error::InvalidKey(format!("instance '{instance}' is not hex")));
        }
        let instance_id = match instance.len() {
            16 => InstanceId::pair(instance[..8].parse()?, instance[8..].parse()?),
            1..=8 => InstanceId::single(instance.parse()?),
            _ => {
                return Err(Error::InvalidKey(format!(
                    "instance '{instance}' must have 8 or 16 hex digits"
                )));
            }
        };

        Ok(Self::new(type_id.parse()?, group_id.parse()?, instance_id))
    }
}

impl Serialize for TgiKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Package-wide values that replace the matching key field of every resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PresentPackageValues {
    pub type_id: Option<Hex32>,
    pub group_id: Option<Hex32>,
    pub instance_id: Option<Hex32>,
}

impl PresentPackageValues {
    /// True if no field is overridden
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.type_id.is_none() && self.group_id.is_none() && self.instance_id.is_none()
    }
}

/// Key decoding switches, resolved once per package
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyCodec {
    present_values: PresentPackageValues,
    high_instance: bool,
    reversed_instance: bool,
}

impl KeyCodec {
    #[must_use]
    pub fn new(present_values: PresentPackageValues, high_instance: bool) -> Self {
        Self {
            present_values,
            high_instance,
            reversed_instance: false,
        }
    }

    /// Put the secondary instance word before the primary one
    #[must_use]
    pub fn with_reversed_instance(mut self, reversed: bool) -> Self {
        self.reversed_instance = reversed;
        self
    }

    /// Decode one key from the stream
    pub fn decode<R: Read + Seek>(&self, reader: &mut R) -> Result<TgiKey> {
        let type_id = match self.present_values.type_id {
            Some(value) => value,
            None => reader.read_hex()?,
        };
        let group_id = match self.present_values.group_id {
            Some(value) => value,
            None => reader.read_hex()?,
        };
        let instance_id = self.decode_instance(reader)?;

        Ok(TgiKey::new(type_id, group_id, instance_id))
    }

    fn decode_instance<R: Read + Seek>(&self, reader: &mut R) -> Result<InstanceId> {
        let primary = reader.read_hex()?;

        let secondary = if let Some(value) = self.present_values.instance_id {
            Some(value)
        } else if self.high_instance {
            Some(reader.read_hex()?)
        } else {
            None
        };

        Ok(match secondary {
            Some(secondary) if self.reversed_instance => InstanceId::pair(secondary, primary),
            Some(secondary) => InstanceId::pair(primary, secondary),
            None => InstanceId::single(primary),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{LittleEndian, WriteBytesExt};
    use std::io::Cursor;

    fn words(values: &[u32]) -> Cursor<Vec<u8>> {
        let mut bytes = Vec::new();
        for value in values {
            bytes.write_u32::<LittleEndian>(*value).unwrap();
        }
        Cursor::new(bytes)
    }

    #[test]
    fn test_plain_key_reads_three_words() {
        let mut cursor = words(&[0x0333_406C, 0x0000_0001, 0xDEAD_BEEF]);
        let key = KeyCodec::default().decode(&mut cursor).unwrap();

        assert_eq!(key.to_string(), "0333406C:00000001:DEADBEEF");
        assert_eq!(cursor.position(), 12);
    }

    #[test]
    fn test_high_instance_appends_second_word() {
        let mut cursor = words(&[1, 2, 0x1111_1111, 0x2222_2222]);
        let key = KeyCodec::new(PresentPackageValues::default(), true)
            .decode(&mut cursor)
            .unwrap();

        assert_eq!(key.to_string(), "00000001:00000002:1111111122222222");
        assert_eq!(key.instance_id.value(), 0x1111_1111_2222_2222);
        assert_eq!(cursor.position(), 16);
    }

    #[test]
    fn test_reversed_instance_swaps_words() {
        let mut cursor = words(&[1, 2, 0x1111_1111, 0x2222_2222]);
        let key = KeyCodec::new(PresentPackageValues::default(), true)
            .with_reversed_instance(true)
            .decode(&mut cursor)
            .unwrap();

        assert_eq!(key.to_string(), "00000001:00000002:2222222211111111");
    }

    #[test]
    fn test_present_values_replace_stream_reads() {
        let ppv = PresentPackageValues {
            type_id: Some(Hex32(0xAAAA_AAAA)),
            group_id: Some(Hex32(0xBBBB_BBBB)),
            instance_id: Some(Hex32(0xCCCC_CCCC)),
        };
        // Only the primary instance comes from the stream, even with high instance on
        let mut cursor = words(&[0x0000_0042, 0xFFFF_FFFF]);
        let key = KeyCodec::new(ppv, true).decode(&mut cursor).unwrap();

        assert_eq!(key.to_string(), "AAAAAAAA:BBBBBBBB:00000042CCCCCCCC");
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_group_override_only() {
        let ppv = PresentPackageValues {
            group_id: Some(Hex32(7)),
            ..PresentPackageValues::default()
        };
        let mut cursor = words(&[0x0000_0010, 0x0000_0020]);
        let key = KeyCodec::new(ppv, false).decode(&mut cursor).unwrap();

        assert_eq!(key.to_string(), "00000010:00000007:00000020");
    }

    #[test]
    fn test_key_parse() {
        let key: TgiKey = "e86b1eef:00000000:0000000000000001".parse().unwrap();
        assert_eq!(key.type_id, Hex32(0xE86B_1EEF));
        assert_eq!(key.to_string(), "E86B1EEF:00000000:0000000000000001");

        let short: TgiKey = "1:2:3".parse().unwrap();
        assert_eq!(short.to_string(), "00000001:00000002:00000003");
    }

    #[test]
    fn test_key_parse_rejects_garbage() {
        assert!("E86B1EEF:00000000".parse::<TgiKey>().is_err());
        assert!("XYZ:00000000:00000000".parse::<TgiKey>().is_err());
        assert!("1:2:123456789".parse::<TgiKey>().is_err());
    }
}
