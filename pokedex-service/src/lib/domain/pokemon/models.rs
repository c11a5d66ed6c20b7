use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::pokemon::errors::PokemonError;

/// Pokemon unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PokemonId(pub i32);

impl fmt::Display for PokemonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stored pokemon entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pokemon {
    pub id: PokemonId,
    pub data: PokemonData,
}

/// Every field of a pokemon except its identifier.
///
/// Used both to create a pokemon and to replace an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonData {
    pub name: String,
    pub type_1: Option<String>,
    pub type_2: Option<String>,
    pub total: i32,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub sp_atk: i32,
    pub sp_def: i32,
    pub speed: i32,
    pub generation: i32,
    pub legendary: bool,
}

/// Fields a pokemon listing may be ordered by.
///
/// This is the complete allow-list: anything else is rejected at parse time,
/// and each variant maps to a fixed column and a typed comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PokemonSortField {
    #[default]
    Id,
    Name,
    Total,
    Hp,
    Attack,
    Defense,
    SpAtk,
    SpDef,
    Speed,
    Generation,
}

impl PokemonSortField {
    pub const ALL: [PokemonSortField; 10] = [
        PokemonSortField::Id,
        PokemonSortField::Name,
        PokemonSortField::Total,
        PokemonSortField::Hp,
        PokemonSortField::Attack,
        PokemonSortField::Defense,
        PokemonSortField::SpAtk,
        PokemonSortField::SpDef,
        PokemonSortField::Speed,
        PokemonSortField::Generation,
    ];

    /// Name accepted in the `sort` query parameter. Also the column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PokemonSortField::Id => "id",
            PokemonSortField::Name => "name",
            PokemonSortField::Total => "total",
            PokemonSortField::Hp => "hp",
            PokemonSortField::Attack => "attack",
            PokemonSortField::Defense => "defense",
            PokemonSortField::SpAtk => "sp_atk",
            PokemonSortField::SpDef => "sp_def",
            PokemonSortField::Speed => "speed",
            PokemonSortField::Generation => "generation",
        }
    }

    pub fn column(&self) -> &'static str {
        self.as_str()
    }

    /// Compare two pokemon on this field, ascending.
    pub fn compare(&self, a: &Pokemon, b: &Pokemon) -> Ordering {
        let (a_data, b_data) = (&a.data, &b.data);
        match self {
            PokemonSortField::Id => a.id.cmp(&b.id),
            PokemonSortField::Name => a_data.name.cmp(&b_data.name),
            PokemonSortField::Total => a_data.total.cmp(&b_data.total),
            PokemonSortField::Hp => a_data.hp.cmp(&b_data.hp),
            PokemonSortField::Attack => a_data.attack.cmp(&b_data.attack),
            PokemonSortField::Defense => a_data.defense.cmp(&b_data.defense),
            PokemonSortField::SpAtk => a_data.sp_atk.cmp(&b_data.sp_atk),
            PokemonSortField::SpDef => a_data.sp_def.cmp(&b_data.sp_def),
            PokemonSortField::Speed => a_data.speed.cmp(&b_data.speed),
            PokemonSortField::Generation => a_data.generation.cmp(&b_data.generation),
        }
    }
}

impl FromStr for PokemonSortField {
    type Err = PokemonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| PokemonError::InvalidSortField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = PokemonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(PokemonError::InvalidSortOrder(s.to_string())),
        }
    }
}

/// Validated page of a sorted listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    pub sort: PokemonSortField,
    pub order: SortOrder,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_SIZE: u32 = 20;
    pub const MAX_SIZE: u32 = 100;

    /// Create a page request. Pages are 1-based.
    ///
    /// # Errors
    /// * `InvalidPageRequest` - `page` is 0, or `size` is 0 or above 100
    pub fn new(
        page: u32,
        size: u32,
        sort: PokemonSortField,
        order: SortOrder,
    ) -> Result<Self, PokemonError> {
        if page == 0 {
            return Err(PokemonError::InvalidPageRequest(
                "page must be at least 1".to_string(),
            ));
        }
        if size == 0 || size > Self::MAX_SIZE {
            return Err(PokemonError::InvalidPageRequest(format!(
                "size must be between 1 and {}",
                Self::MAX_SIZE
            )));
        }

        Ok(Self {
            page,
            size,
            sort,
            order,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }

    /// Order `items` in place by this request's field and direction, id breaking ties.
    pub fn sort_items(&self, items: &mut [Pokemon]) {
        items.sort_by(|a, b| {
            self.order
                .apply(self.sort.compare(a, b))
                .then_with(|| a.id.cmp(&b.id))
        });
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            size: Self::DEFAULT_SIZE,
            sort: PokemonSortField::default(),
            order: SortOrder::default(),
        }
    }
}

/// One page of results plus the total number of matching items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.size))
    }
}
