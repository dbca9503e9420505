macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size)? }};
}

// Shorthand for return Err(TaggerError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(TaggerError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(TaggerError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::TaggerError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::TaggerError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for Id3v2Error::new(Id3v2ErrorKind::Foo).into()
//
// Usage:
//
// - id3v2_err!(Variant)
// - id3v2_err!(Variant(args..))
// - id3v2_err!(Variant { fields.. })
//
// or bail:
//
// - id3v2_err!(@BAIL Variant)
macro_rules! id3v2_err {
	(@BAIL $($tt:tt)+) => {
		return Err(id3v2_err!($($tt)+))
	};
	($variant:ident $($rest:tt)*) => {
		Into::<crate::error::TaggerError>::into(crate::error::Id3v2Error::new(
			crate::error::Id3v2ErrorKind::$variant $($rest)*,
		))
	};
}

// A macro for handling the different `ParsingMode`s
//
// NOTE: All fields are optional, if `STRICT` or `RELAXED` are missing, it will
// 		 fall through to `DEFAULT`. If `DEFAULT` is missing, it will fall through
// 		 to an empty block.
//
// Usage:
//
// - parse_mode_choice!(
// 		ident_of_parsing_mode,
// 		STRICT: some_expr,
// 		RELAXED: some_expr,
// 		DEFAULT: some_expr,
// 	 )
macro_rules! parse_mode_choice {
	(
		$parse_mode:ident,
		$(STRICT: $strict_handler:expr,)?
		$(BESTATTEMPT: $best_attempt_handler:expr,)?
		$(RELAXED: $relaxed_handler:expr,)?
		DEFAULT: $default:expr
	) => {
		match $parse_mode {
			$(crate::config::ParsingMode::Strict => { $strict_handler },)?
			$(crate::config::ParsingMode::BestAttempt => { $best_attempt_handler },)?
			$(crate::config::ParsingMode::Relaxed => { $relaxed_handler },)?
			#[allow(unreachable_patterns)]
			_ => { $default }
		}
	};
}

pub(crate) use {err, id3v2_err, parse_mode_choice, try_vec};
