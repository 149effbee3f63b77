//! Deterministic binary encoding for account records and instructions.
//!
//! All numeric values are little-endian. Both formats are fixed-layout and
//! decoding is strict: short input, trailing bytes, unknown tags and
//! non-zero reserved bytes are all rejected.
//!
//! Account record (44 bytes):
//!
//! ```text
//! [0]      u8        discriminator   (1 = Counter, 2 = Avatar)
//! [1]      u8        layout version  (= 1)
//! [2..4]   u16       reserved        (0)
//! [4..36]  [u8; 32]  authority
//! [36..44] i64       value
//! ```
//!
//! Instruction:
//!
//! ```text
//! [0]      u8        discriminant    (0 initialize, 1 increment, 2 decrement, 3 level_up)
//! [1..33]  [u8; 32]  target account
//! initialize only:
//! [33]     u8        account kind
//! [34..66] [u8; 32]  initializing signer
//! ```

use crate::account::{Account, AccountKind};
use crate::error::TallyError;
use crate::instruction::{Instruction, IX_DECREMENT, IX_INCREMENT, IX_INITIALIZE, IX_LEVEL_UP};
use crate::types::Pubkey;

/// Encoded size of an account record.
pub const ACCOUNT_LEN: usize = 44;

/// Current account layout version.
pub const ACCOUNT_VERSION: u8 = 1;

/// A cursor for reading bytes during decoding.
///
/// `make_err` decides which error a malformed input surfaces as, so the
/// same reader serves stored records (`Corrupt`) and client input
/// (`InvalidInstruction`).
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    make_err: fn(String) -> TallyError,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8], make_err: fn(String) -> TallyError) -> Self {
        Self { data, pos: 0, make_err }
    }

    fn err(&self, msg: impl Into<String>) -> TallyError {
        (self.make_err)(msg.into())
    }

    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], TallyError> {
        if self.pos + n > self.data.len() {
            return Err(self.err(format!(
                "unexpected end of data at offset {} (need {} bytes, have {})",
                self.pos,
                n,
                self.data.len() - self.pos
            )));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, TallyError> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16, TallyError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_i64(&mut self) -> Result<i64, TallyError> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.read_bytes(8)?);
        Ok(i64::from_le_bytes(buf))
    }

    fn read_pubkey(&mut self) -> Result<Pubkey, TallyError> {
        let mut buf = [0u8; 32];
        buf.copy_from_slice(self.read_bytes(32)?);
        Ok(Pubkey::new_from_array(buf))
    }

    fn read_kind(&mut self) -> Result<AccountKind, TallyError> {
        let tag = self.read_u8()?;
        AccountKind::from_u8(tag).ok_or_else(|| self.err(format!("unknown account kind: 0x{tag:02x}")))
    }

    /// Fail if any bytes are left unread.
    fn finish(self) -> Result<(), TallyError> {
        if self.pos != self.data.len() {
            return Err(self.err(format!("{} trailing bytes", self.data.len() - self.pos)));
        }
        Ok(())
    }
}

/// Encode an account record.
pub fn encode_account(account: &Account) -> Vec<u8> {
    let mut buf = Vec::with_capacity(ACCOUNT_LEN);
    buf.push(account.kind.as_u8());
    buf.push(ACCOUNT_VERSION);
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(account.authority.as_bytes());
    buf.extend_from_slice(&account.value.to_le_bytes());
    buf
}

/// Decode an account record. Any malformation is `Corrupt`.
pub fn decode_account(data: &[u8]) -> Result<Account, TallyError> {
    if data.len() != ACCOUNT_LEN {
        return Err(TallyError::Corrupt(format!(
            "record is {} bytes, expected {}",
            data.len(),
            ACCOUNT_LEN
        )));
    }
    let mut r = Reader::new(data, TallyError::Corrupt);

    let kind = r.read_kind()?;
    let version = r.read_u8()?;
    if version != ACCOUNT_VERSION {
        return Err(r.err(format!("unsupported layout version {version}")));
    }
    if r.read_u16()? != 0 {
        return Err(r.err("reserved bytes are not zero"));
    }
    let authority = r.read_pubkey()?;
    let value = r.read_i64()?;
    r.finish()?;

    Ok(Account { kind, authority, value })
}

/// Encode an instruction.
pub fn encode_instruction(ix: &Instruction) -> Vec<u8> {
    let mut buf = Vec::with_capacity(66);
    buf.push(ix.discriminant());
    buf.extend_from_slice(ix.target().as_bytes());
    if let Instruction::Initialize { kind, authority, .. } = ix {
        buf.push(kind.as_u8());
        buf.extend_from_slice(authority.as_bytes());
    }
    buf
}

/// Decode an instruction. Any malformation is `InvalidInstruction`.
pub fn decode_instruction(data: &[u8]) -> Result<Instruction, TallyError> {
    let mut r = Reader::new(data, TallyError::InvalidInstruction);

    let discriminant = r.read_u8()?;
    let account = r.read_pubkey()?;
    let ix = match discriminant {
        IX_INITIALIZE => Instruction::Initialize {
            account,
            kind: r.read_kind()?,
            authority: r.read_pubkey()?,
        },
        IX_INCREMENT => Instruction::Increment { account },
        IX_DECREMENT => Instruction::Decrement { account },
        IX_LEVEL_UP => Instruction::LevelUp { account },
        other => return Err(r.err(format!("unknown discriminant: 0x{other:02x}"))),
    };
    r.finish()?;
    Ok(ix)
}
