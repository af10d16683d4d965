use std::fmt;

/// Postal address and coordinates of a hotel.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
	pub street: String,
	pub city: String,
	pub state: String,
	pub latitude: f64,
	pub longitude: f64,
}

impl Address {
	pub fn new(street: impl Into<String>, city: impl Into<String>, state: impl Into<String>, latitude: f64, longitude: f64) -> Self {
		Self {
			street: street.into(),
			city: city.into(),
			state: state.into(),
			latitude,
			longitude,
		}
	}
}

/// Renders as the street on one line and `city, state` on the next.
impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}\n{}, {}", self.street, self.city, self.state)
	}
}

/// One hotel. Identity and address never change after creation; only the
/// recorded average is updated, by [`crate::GuardedStore::record_aggregate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Hotel {
	id: String,
	name: String,
	address: Address,
	average_rating: Option<f64>,
}

impl Hotel {
	pub fn new(id: impl Into<String>, name: impl Into<String>, address: Address) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			address,
			average_rating: None,
		}
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn address(&self) -> &Address {
		&self.address
	}

	/// Average recorded by the last finalize pass, `None` before it ran.
	pub fn average_rating(&self) -> Option<f64> {
		self.average_rating
	}

	pub(crate) fn set_average_rating(&mut self, value: f64) {
		self.average_rating = Some(value);
	}
}

/// Header block: `name: id`, then the address.
impl fmt::Display for Hotel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}\n{}", self.name, self.id, self.address)
	}
}
