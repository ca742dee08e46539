use core::fmt;

/// Raw five-byte payload received from the sensor.
///
/// Fields are in wire order. The checksum is kept as received; see
/// [`Reading::is_checksum_valid`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reading {
    pub humidity_int: u8,
    pub humidity_frac: u8,
    pub temperature_int: u8,
    pub temperature_frac: u8,
    pub checksum: u8,
}

/// Reading converted to physical units.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub relative_humidity: f32,
}

impl Reading {
    /// Builds a reading from the five bytes in wire order.
    pub fn from_bytes(bytes: [u8; 5]) -> Self {
        let [humidity_int, humidity_frac, temperature_int, temperature_frac, checksum] = bytes;
        Reading {
            humidity_int,
            humidity_frac,
            temperature_int,
            temperature_frac,
            checksum,
        }
    }

    /// The five bytes in wire order.
    pub fn to_bytes(&self) -> [u8; 5] {
        [
            self.humidity_int,
            self.humidity_frac,
            self.temperature_int,
            self.temperature_frac,
            self.checksum,
        ]
    }

    /// Low byte of the sum of the four data bytes.
    pub fn expected_checksum(&self) -> u8 {
        self.to_bytes()[..4]
            .iter()
            .fold(0u8, |sum, v| sum.wrapping_add(*v))
    }

    /// Whether the received checksum matches the data bytes.
    pub fn is_checksum_valid(&self) -> bool {
        self.expected_checksum() == self.checksum
    }

    /// Relative humidity in percent, DHT11 layout (integer and tenths).
    pub fn relative_humidity(&self) -> f32 {
        tenths(self.humidity_int, self.humidity_frac)
    }

    /// Temperature in degrees Celsius, DHT11 layout (integer and tenths).
    pub fn temperature(&self) -> f32 {
        tenths(self.temperature_int, self.temperature_frac)
    }

    /// Interprets the payload with the DHT11 byte layout.
    pub fn dht11(&self) -> Measurement {
        Measurement {
            temperature: self.temperature(),
            relative_humidity: self.relative_humidity(),
        }
    }

    /// Interprets the payload with the DHT22 (AM2302) byte layout.
    ///
    /// Both quantities are big-endian 16-bit values in tenths; bit 15 of
    /// the temperature is a sign bit.
    pub fn dht22(&self) -> Measurement {
        let joined_humidity = u16::from_be_bytes([self.humidity_int, self.humidity_frac]);
        let relative_humidity = joined_humidity as f32 / 10.0;

        let is_temp_negative = (self.temperature_int >> 7) != 0;
        let temp_hi = self.temperature_int & 0b0111_1111;
        let joined_temp = u16::from_be_bytes([temp_hi, self.temperature_frac]);
        let mut temperature = joined_temp as f32 / 10.0;
        if is_temp_negative {
            temperature = -temperature;
        }

        Measurement {
            temperature,
            relative_humidity,
        }
    }
}

fn tenths(int: u8, frac: u8) -> f32 {
    (int as u16 * 10 + frac as u16) as f32 / 10.0
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Humidity: {}.{} % | Temperature: {}.{} C",
            self.humidity_int, self.humidity_frac, self.temperature_int, self.temperature_frac
        )
    }
}
