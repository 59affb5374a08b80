//! Simulated IS31FL3731 on a fake I2C bus

use ledscroll_hal::I2cBus;

use crate::is31fl3731::{reg, DEFAULT_ADDRESS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

/// Register file of one chip, every register starting at 0xEE
pub struct MockChip {
    banks: [[u8; 256]; 12],
    bank: usize,
    /// Raw payloads written to the chip, in order
    pub writes: Vec<Vec<u8>>,
    /// Fail every transfer
    pub fail: bool,
}

impl MockChip {
    pub fn new() -> Self {
        Self {
            banks: [[0xEE; 256]; 12],
            bank: 0,
            writes: Vec::new(),
            fail: false,
        }
    }

    pub fn register(&self, bank: u8, register: u8) -> u8 {
        self.banks[bank as usize][register as usize]
    }
}

impl I2cBus for MockChip {
    type Error = BusFault;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(BusFault);
        }
        if address != DEFAULT_ADDRESS {
            return Ok(());
        }
        self.writes.push(data.to_vec());

        let Some((&register, values)) = data.split_first() else {
            return Ok(());
        };
        if register == reg::BANK_SELECT {
            self.bank = values[0] as usize;
            return Ok(());
        }
        for (i, &v) in values.iter().enumerate() {
            self.banks[self.bank][register as usize + i] = v;
        }
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(BusFault);
        }
        if address != DEFAULT_ADDRESS {
            return Ok(());
        }
        let start = write_data[0] as usize;
        for (i, b) in read_buf.iter_mut().enumerate() {
            *b = self.banks[self.bank][start + i];
        }
        Ok(())
    }
}
