use std::collections::HashMap;
use std::sync::LazyLock;

use freshkeep_shared::food::{Category, StorageType};
use serde::Serialize;

/// Days an item keeps per storage location. `None` means the location is
/// not recommended for that food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShelfLife {
    pub fridge: Option<u16>,
    pub freezer: Option<u16>,
    pub room: Option<u16>,
}

impl ShelfLife {
    pub fn days(&self, storage: StorageType) -> Option<u16> {
        match storage {
            StorageType::Fridge => self.fridge,
            StorageType::Freezer => self.freezer,
            StorageType::Room => self.room,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    pub name: &'static str,
    pub category: Category,
    pub default_storage: StorageType,
    pub aliases: &'static [&'static str],
    pub shelf_life: ShelfLife,
    pub tips: &'static [&'static str],
}

const fn days(fridge: Option<u16>, freezer: Option<u16>, room: Option<u16>) -> ShelfLife {
    ShelfLife {
        fridge,
        freezer,
        room,
    }
}

// Table order matters: substring matching returns the first hit.
pub static FOODS: &[FoodEntry] = &[
    FoodEntry {
        name: "우유",
        category: Category::Dairy,
        default_storage: StorageType::Fridge,
        aliases: &["milk", "흰우유"],
        shelf_life: days(Some(7), None, None),
        tips: &[
            "Keep it on a shelf, not in the door, where the temperature swings.",
            "Smell before use once opened for more than three days.",
        ],
    },
    FoodEntry {
        name: "달걀",
        category: Category::Dairy,
        default_storage: StorageType::Fridge,
        aliases: &["계란", "egg", "eggs"],
        shelf_life: days(Some(21), None, Some(7)),
        tips: &["Store pointed end down and do not wash before storing."],
    },
    FoodEntry {
        name: "두부",
        category: Category::Other,
        default_storage: StorageType::Fridge,
        aliases: &["tofu"],
        shelf_life: days(Some(5), Some(30), None),
        tips: &["Once opened, cover with water and change it daily."],
    },
    FoodEntry {
        name: "치즈",
        category: Category::Dairy,
        default_storage: StorageType::Fridge,
        aliases: &["cheese", "슬라이스치즈"],
        shelf_life: days(Some(21), Some(60), None),
        tips: &["Wrap tightly to stop it drying out."],
    },
    FoodEntry {
        name: "요거트",
        category: Category::Dairy,
        default_storage: StorageType::Fridge,
        aliases: &["yogurt", "yoghurt", "요구르트"],
        shelf_life: days(Some(10), None, None),
        tips: &[],
    },
    FoodEntry {
        name: "버터",
        category: Category::Dairy,
        default_storage: StorageType::Fridge,
        aliases: &["butter"],
        shelf_life: days(Some(30), Some(180), None),
        tips: &["Freeze in portions if you bake rarely."],
    },
    FoodEntry {
        name: "돼지고기",
        category: Category::Meat,
        default_storage: StorageType::Fridge,
        aliases: &["pork", "삼겹살", "목살"],
        shelf_life: days(Some(3), Some(90), None),
        tips: &["Freeze in meal-sized portions on the day of purchase."],
    },
    FoodEntry {
        name: "소고기",
        category: Category::Meat,
        default_storage: StorageType::Fridge,
        aliases: &["beef", "쇠고기", "한우"],
        shelf_life: days(Some(3), Some(120), None),
        tips: &["Pat dry and wrap before freezing to avoid freezer burn."],
    },
    FoodEntry {
        name: "닭고기",
        category: Category::Meat,
        default_storage: StorageType::Fridge,
        aliases: &["chicken", "닭", "닭가슴살"],
        shelf_life: days(Some(2), Some(90), None),
        tips: &["Keep on the lowest shelf so juices cannot drip onto other food."],
    },
    FoodEntry {
        name: "햄",
        category: Category::Meat,
        default_storage: StorageType::Fridge,
        aliases: &["ham", "슬라이스햄"],
        shelf_life: days(Some(7), Some(60), None),
        tips: &[],
    },
    FoodEntry {
        name: "고등어",
        category: Category::Seafood,
        default_storage: StorageType::Freezer,
        aliases: &["mackerel"],
        shelf_life: days(Some(2), Some(90), None),
        tips: &["Gut and rinse before freezing."],
    },
    FoodEntry {
        name: "새우",
        category: Category::Seafood,
        default_storage: StorageType::Freezer,
        aliases: &["shrimp", "prawn"],
        shelf_life: days(Some(2), Some(90), None),
        tips: &[],
    },
    FoodEntry {
        name: "오징어",
        category: Category::Seafood,
        default_storage: StorageType::Freezer,
        aliases: &["squid"],
        shelf_life: days(Some(2), Some(90), None),
        tips: &[],
    },
    FoodEntry {
        name: "양파",
        category: Category::Vegetable,
        default_storage: StorageType::Room,
        aliases: &["onion"],
        shelf_life: days(Some(30), None, Some(14)),
        tips: &["Keep away from potatoes; together both spoil faster."],
    },
    FoodEntry {
        name: "대파",
        category: Category::Vegetable,
        default_storage: StorageType::Fridge,
        aliases: &["파", "green onion", "scallion"],
        shelf_life: days(Some(10), Some(60), None),
        tips: &["Chop and freeze what you will not use within a week."],
    },
    FoodEntry {
        name: "마늘",
        category: Category::Vegetable,
        default_storage: StorageType::Fridge,
        aliases: &["garlic", "다진마늘"],
        shelf_life: days(Some(30), Some(90), Some(14)),
        tips: &[],
    },
    FoodEntry {
        name: "감자",
        category: Category::Vegetable,
        default_storage: StorageType::Room,
        aliases: &["potato", "potatoes"],
        shelf_life: days(Some(30), None, Some(21)),
        tips: &["Store in a dark place; remove any green parts before cooking."],
    },
    FoodEntry {
        name: "고구마",
        category: Category::Vegetable,
        default_storage: StorageType::Room,
        aliases: &["sweet potato"],
        shelf_life: days(None, None, Some(21)),
        tips: &["Cold damages sweet potatoes; keep them out of the fridge."],
    },
    FoodEntry {
        name: "당근",
        category: Category::Vegetable,
        default_storage: StorageType::Fridge,
        aliases: &["carrot", "carrots"],
        shelf_life: days(Some(21), Some(90), None),
        tips: &[],
    },
    FoodEntry {
        name: "양배추",
        category: Category::Vegetable,
        default_storage: StorageType::Fridge,
        aliases: &["cabbage"],
        shelf_life: days(Some(14), None, None),
        tips: &["Wrap the cut side to keep it from drying."],
    },
    FoodEntry {
        name: "배추",
        category: Category::Vegetable,
        default_storage: StorageType::Fridge,
        aliases: &["napa cabbage", "알배추"],
        shelf_life: days(Some(14), None, None),
        tips: &[],
    },
    FoodEntry {
        name: "시금치",
        category: Category::Vegetable,
        default_storage: StorageType::Fridge,
        aliases: &["spinach"],
        shelf_life: days(Some(5), Some(30), None),
        tips: &["Blanch before freezing."],
    },
    FoodEntry {
        name: "상추",
        category: Category::Vegetable,
        default_storage: StorageType::Fridge,
        aliases: &["lettuce"],
        shelf_life: days(Some(5), None, None),
        tips: &["Store with a damp paper towel in a sealed container."],
    },
    FoodEntry {
        name: "오이",
        category: Category::Vegetable,
        default_storage: StorageType::Fridge,
        aliases: &["cucumber"],
        shelf_life: days(Some(7), None, None),
        tips: &[],
    },
    FoodEntry {
        name: "토마토",
        category: Category::Vegetable,
        default_storage: StorageType::Fridge,
        aliases: &["tomato", "방울토마토", "cherry tomato"],
        shelf_life: days(Some(7), None, Some(3)),
        tips: &["Ripen at room temperature, then refrigerate."],
    },
    FoodEntry {
        name: "버섯",
        category: Category::Vegetable,
        default_storage: StorageType::Fridge,
        aliases: &["mushroom", "표고버섯", "팽이버섯"],
        shelf_life: days(Some(7), Some(30), None),
        tips: &["Do not wash until just before cooking."],
    },
    FoodEntry {
        name: "사과",
        category: Category::Fruit,
        default_storage: StorageType::Fridge,
        aliases: &["apple"],
        shelf_life: days(Some(30), None, Some(7)),
        tips: &["Apples release ethylene; store them apart from other produce."],
    },
    FoodEntry {
        name: "바나나",
        category: Category::Fruit,
        default_storage: StorageType::Room,
        aliases: &["banana"],
        shelf_life: days(None, Some(60), Some(5)),
        tips: &["Peel and freeze overripe bananas for smoothies."],
    },
    FoodEntry {
        name: "딸기",
        category: Category::Fruit,
        default_storage: StorageType::Fridge,
        aliases: &["strawberry", "strawberries"],
        shelf_life: days(Some(3), Some(90), None),
        tips: &[],
    },
    FoodEntry {
        name: "귤",
        category: Category::Fruit,
        default_storage: StorageType::Room,
        aliases: &["감귤", "mandarin", "tangerine"],
        shelf_life: days(Some(21), None, Some(10)),
        tips: &[],
    },
    FoodEntry {
        name: "쌀",
        category: Category::Grain,
        default_storage: StorageType::Room,
        aliases: &["rice", "백미"],
        shelf_life: days(Some(365), None, Some(180)),
        tips: &["Keep in an airtight container away from humidity."],
    },
    FoodEntry {
        name: "식빵",
        category: Category::Grain,
        default_storage: StorageType::Room,
        aliases: &["bread", "빵"],
        shelf_life: days(Some(7), Some(30), Some(3)),
        tips: &["Freeze sliced and toast straight from frozen."],
    },
    FoodEntry {
        name: "김치",
        category: Category::Other,
        default_storage: StorageType::Fridge,
        aliases: &["kimchi", "배추김치"],
        shelf_life: days(Some(90), None, None),
        tips: &["Press down to keep the cabbage under the brine."],
    },
    FoodEntry {
        name: "된장",
        category: Category::Seasoning,
        default_storage: StorageType::Fridge,
        aliases: &["doenjang", "soybean paste"],
        shelf_life: days(Some(365), None, Some(180)),
        tips: &[],
    },
    FoodEntry {
        name: "고추장",
        category: Category::Seasoning,
        default_storage: StorageType::Fridge,
        aliases: &["gochujang", "red pepper paste"],
        shelf_life: days(Some(365), None, None),
        tips: &[],
    },
    FoodEntry {
        name: "간장",
        category: Category::Seasoning,
        default_storage: StorageType::Room,
        aliases: &["soy sauce"],
        shelf_life: days(Some(730), None, Some(365)),
        tips: &[],
    },
];

static KNOWLEDGE_BASE: LazyLock<KnowledgeBase> = LazyLock::new(|| KnowledgeBase::new(FOODS));

/// Process-wide knowledge base over the compiled-in table.
pub fn knowledge_base() -> &'static KnowledgeBase {
    &KNOWLEDGE_BASE
}

/// Read-only food table with its name and alias indices.
pub struct KnowledgeBase {
    entries: &'static [FoodEntry],
    names: HashMap<&'static str, usize>,
    /// Lowercased alias -> entry index. The first entry declaring an alias owns it.
    aliases: HashMap<String, usize>,
}

impl KnowledgeBase {
    pub fn new(entries: &'static [FoodEntry]) -> Self {
        let mut names = HashMap::with_capacity(entries.len());
        let mut aliases = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            names.entry(entry.name).or_insert(index);
            for alias in entry.aliases {
                aliases.entry(alias.to_lowercase()).or_insert(index);
            }
        }

        Self {
            entries,
            names,
            aliases,
        }
    }

    pub fn entries(&self) -> &'static [FoodEntry] {
        self.entries
    }

    /// Resolves a free-form ingredient name to a table entry.
    ///
    /// Tiers are tried in order and the first hit wins: exact canonical name,
    /// exact alias (case-insensitive), canonical substring in either
    /// direction, alias substring in either direction (case-insensitive).
    /// Substring tiers scan in table order, so an input that is a substring of
    /// several names resolves to the earliest one.
    pub fn lookup(&self, raw_name: &str) -> Option<&'static FoodEntry> {
        let entries = self.entries;
        let name = raw_name.trim();
        if name.is_empty() {
            return None;
        }

        if let Some(index) = self.names.get(name) {
            return entries.get(*index);
        }

        let lowered = name.to_lowercase();
        if let Some(index) = self.aliases.get(&lowered) {
            return entries.get(*index);
        }

        if let Some(entry) = entries
            .iter()
            .find(|entry| entry.name.contains(name) || name.contains(entry.name))
        {
            return Some(entry);
        }

        entries.iter().find(|entry| {
            entry.aliases.iter().any(|alias| {
                let alias = alias.to_lowercase();
                alias.contains(&lowered) || lowered.contains(&alias)
            })
        })
    }

    pub fn shelf_life_days(&self, raw_name: &str, storage: StorageType) -> Option<u16> {
        self.lookup(raw_name).and_then(|entry| entry.shelf_life.days(storage))
    }
}
