//! CC1101-core configuration register settings.
//!
//! The radio core is configured once per session by uploading the 35
//! register bytes below (see [`crate::radio::Transceiver::write_configuration`]).
//! [`Cc1101Settings::DEFAULT`] carries the stock calibration: MSK
//! modulation at 64 kbps on a 437.24 MHz carrier with infinite packet
//! length, which lets the FIFO streaming engine radiate arbitrarily long
//! chip streams.

/// Configuration register values for a CC1101-class radio core.
///
/// Field order follows the upload order used by the hardware driver.
/// All values are plain register bytes; none are interpreted by this
/// crate beyond being handed to the transceiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Cc1101Settings {
    /// FSCTRL1, frequency synthesizer control.
    pub fsctrl1: u8,
    /// FSCTRL0, frequency synthesizer control.
    pub fsctrl0: u8,
    /// FREQ2, frequency control word, high byte.
    pub freq2: u8,
    /// FREQ1, frequency control word, middle byte.
    pub freq1: u8,
    /// FREQ0, frequency control word, low byte.
    pub freq0: u8,
    /// MDMCFG4, modem configuration.
    pub mdmcfg4: u8,
    /// MDMCFG3, modem configuration.
    pub mdmcfg3: u8,
    /// MDMCFG2, modem configuration.
    pub mdmcfg2: u8,
    /// MDMCFG1, modem configuration.
    pub mdmcfg1: u8,
    /// MDMCFG0, modem configuration.
    pub mdmcfg0: u8,
    /// CHANNR, channel number.
    pub channr: u8,
    /// DEVIATN, modem deviation setting.
    pub deviatn: u8,
    /// FREND1, front end RX configuration.
    pub frend1: u8,
    /// FREND0, front end TX configuration.
    pub frend0: u8,
    /// MCSM0, main radio control state machine configuration.
    pub mcsm0: u8,
    /// FOCCFG, frequency offset compensation configuration.
    pub foccfg: u8,
    /// BSCFG, bit synchronization configuration.
    pub bscfg: u8,
    /// AGCCTRL2, AGC control.
    pub agcctrl2: u8,
    /// AGCCTRL1, AGC control.
    pub agcctrl1: u8,
    /// AGCCTRL0, AGC control.
    pub agcctrl0: u8,
    /// FSCAL3, frequency synthesizer calibration.
    pub fscal3: u8,
    /// FSCAL2, frequency synthesizer calibration.
    pub fscal2: u8,
    /// FSCAL1, frequency synthesizer calibration.
    pub fscal1: u8,
    /// FSCAL0, frequency synthesizer calibration.
    pub fscal0: u8,
    /// FSTEST, frequency synthesizer calibration control.
    pub fstest: u8,
    /// TEST2, various test settings.
    pub test2: u8,
    /// TEST1, various test settings.
    pub test1: u8,
    /// TEST0, various test settings.
    pub test0: u8,
    /// FIFOTHR, RX/TX FIFO thresholds.
    pub fifothr: u8,
    /// IOCFG2, GDO2 output pin configuration.
    pub iocfg2: u8,
    /// IOCFG0, GDO0 output pin configuration.
    pub iocfg0: u8,
    /// PKTCTRL1, packet automation control.
    pub pktctrl1: u8,
    /// PKTCTRL0, packet automation control.
    pub pktctrl0: u8,
    /// ADDR, device address.
    pub addr: u8,
    /// PKTLEN, packet length.
    pub pktlen: u8,
}

impl Cc1101Settings {
    /// Stock calibration: 64 kbps MSK on a 437.24 MHz carrier.
    pub const DEFAULT: Cc1101Settings = Cc1101Settings {
        fsctrl1: 0x0E,
        fsctrl0: 0x00,
        freq2: 0x10,
        freq1: 0xD1,
        freq0: 0x21,
        mdmcfg4: 0x0B,
        mdmcfg3: 0x43,
        mdmcfg2: 0x70,
        mdmcfg1: 0x02,
        mdmcfg0: 0xF8,
        channr: 0x00,
        deviatn: 0x07,
        frend1: 0xB6,
        frend0: 0x10,
        mcsm0: 0x18,
        foccfg: 0x1D,
        bscfg: 0x1C,
        agcctrl2: 0xC7,
        agcctrl1: 0x00,
        agcctrl0: 0xB0,
        fscal3: 0xEA,
        fscal2: 0x2A,
        fscal1: 0x00,
        fscal0: 0x1F,
        fstest: 0x59,
        test2: 0x88,
        test1: 0x31,
        test0: 0x09,
        fifothr: 0x07,
        iocfg2: 0x29,
        iocfg0: 0x06,
        pktctrl1: 0x00,
        // 0x02 = infinite packet length; the streaming engine ends a
        // transmission by draining the FIFO, not by a length counter.
        pktctrl0: 0x02,
        addr: 0x00,
        pktlen: 0xFF,
    };
}

impl Default for Cc1101Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_infinite_packet_length() {
        let settings = Cc1101Settings::default();
        assert_eq!(settings.pktctrl0, 0x02);
        assert_eq!(settings.pktlen, 0xFF);
    }

    #[test]
    fn test_default_carrier_word() {
        // 0x10D121 * 26 MHz / 2^16 = 437.24 MHz
        let s = Cc1101Settings::DEFAULT;
        assert_eq!((s.freq2, s.freq1, s.freq0), (0x10, 0xD1, 0x21));
    }
}
