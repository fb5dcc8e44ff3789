use log::warn;

/// Listen settings for a host serving the search endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
	/// TCP port to listen on.
	pub port: u16,
}

impl ServerConfig {
	/// Port used when `PORT` is unset or invalid.
	pub const DEFAULT_PORT: u16 = 3000;

	/// Reads `PORT` from the process environment.
	pub fn from_env() -> Self {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Reads `PORT` through `lookup`.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let port = match lookup("PORT") {
			None => Self::DEFAULT_PORT,
			Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
				warn!("ignoring invalid PORT {raw:?}, using {}", Self::DEFAULT_PORT);
				Self::DEFAULT_PORT
			}),
		};
		Self { port }
	}
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			port: Self::DEFAULT_PORT,
		}
	}
}
