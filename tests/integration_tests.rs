use multisort::prelude::*;
use rand::Rng;
use serde_json::{json, Value as Json};

fn sample_data() -> Vec<Json> {
    vec![
        json!({"name": "Jim", "age": 35, "sex": "M"}),
        json!({"name": "Sarah", "age": 20, "sex": "F"}),
        json!({"name": "Alex", "age": 35, "sex": "M"}),
        json!({"name": "Bill", "age": 40, "sex": "M"}),
        json!({"name": "Wallace", "age": 20, "sex": "M"}),
        json!({"name": "Linda", "age": 25, "sex": "F"}),
    ]
}

fn names<'a>(rows: impl IntoIterator<Item = &'a Json>) -> Vec<&'a str> {
    rows.into_iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
struct Person {
    name: String,
    age: u32,
    sex: char,
    sex_label: String,
}

impl Person {
    fn from_json(row: &Json) -> Self {
        let sex = row["sex"].as_str().unwrap();
        Person {
            name: row["name"].as_str().unwrap().to_string(),
            age: row["age"].as_u64().unwrap() as u32,
            sex: sex.chars().next().unwrap(),
            sex_label: sex.to_string(),
        }
    }
}

impl Record for Person {
    fn attribute(&self, name: &str) -> Result<Value<'_>> {
        match name {
            "name" => Ok(Value::Str(&self.name)),
            "age" => Ok(Value::UInt(self.age.into())),
            "sex" => Ok(Value::Str(&self.sex_label)),
            _ => Err(SortError::MissingAttribute {
                kind: "Person",
                name: name.to_string(),
            }),
        }
    }

    // Attributes in name order: age, name, sex.
    fn natural_value(&self) -> Value<'_> {
        Value::List(vec![
            Value::UInt(self.age.into()),
            Value::Str(&self.name),
            Value::Str(&self.sex_label),
        ])
    }
}

fn sample_people() -> Vec<Person> {
    sample_data().iter().map(Person::from_json).collect()
}

#[test]
fn test_sort_by_item_sample() {
    let data = sample_data();
    let sorted = sort(&data, &Getter::Item, ["age", "name desc"]).unwrap();

    assert_eq!(
        names(sorted),
        vec!["Wallace", "Sarah", "Linda", "Jim", "Alex", "Bill"]
    );
}

#[test]
fn test_sort_by_item_shorthand() {
    let data = sample_data();
    let sorted = sort_by_item(&data, ["age", "name desc"]).unwrap();

    assert_eq!(
        names(sorted),
        vec!["Wallace", "Sarah", "Linda", "Jim", "Alex", "Bill"]
    );
    // Input untouched.
    assert_eq!(data, sample_data());
}

#[test]
fn test_sort_by_attribute_sample() {
    let people = sample_people();
    let sorted = sort(&people, &Getter::Attribute, ["sex desc", "name desc"]).unwrap();
    let order: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();

    assert_eq!(
        order,
        vec!["Wallace", "Jim", "Bill", "Alex", "Sarah", "Linda"]
    );
}

#[test]
fn test_sort_by_attribute_shorthand() {
    let people = sample_people();
    let sorted = sort_by_attribute(&people, ["sex desc", "name desc"]).unwrap();

    assert_eq!(sorted[0].name, "Wallace");
    assert_eq!(sorted[5].name, "Linda");
    assert_eq!(sorted[0].sex, 'M');
}

#[test]
fn test_equal_keys_keep_input_order() {
    let data = vec![
        json!({"age": 20, "name": "Sarah"}),
        json!({"age": 20, "name": "Wallace"}),
    ];

    assert_eq!(names(sort_by_item(&data, ["age"]).unwrap()), vec!["Sarah", "Wallace"]);
    assert_eq!(names(sort_by_item(&data, ["-age"]).unwrap()), vec!["Sarah", "Wallace"]);
}

#[test]
fn test_nested_key_groups() {
    let data = sample_data();
    let inner: Vec<Nested<KeyToken>> = vec!["age".into(), ["name"].into()];
    let keys: Vec<Nested<KeyToken>> = vec!["-sex".into(), inner.into()];
    let sorted = sort_by_item(&data, keys).unwrap();

    assert_eq!(
        names(sorted),
        vec!["Wallace", "Alex", "Jim", "Bill", "Sarah", "Linda"]
    );
}

#[test]
fn test_index_keys_on_rows() {
    let rows = vec![
        json!(["b", 2]),
        json!(["a", 2]),
        json!(["c", 1]),
    ];
    let sorted = sort_by_item(&rows, ["-1", "0"]).unwrap();
    let firsts: Vec<&str> = sorted.iter().map(|row| row[0].as_str().unwrap()).collect();

    assert_eq!(firsts, vec!["a", "b", "c"]);
}

#[test]
fn test_integer_tokens() {
    let rows: Vec<Vec<i64>> = vec![vec![1, 9], vec![0, 5], vec![1, 3]];
    let keys: Vec<KeyToken> = vec![0i64.into(), (-1i64).into()];
    let sorted = sort_by_item(&rows, keys).unwrap();

    assert_eq!(sorted, vec![&vec![0, 5], &vec![1, 9], &vec![1, 3]]);
}

#[test]
fn test_keyless_sort_matches_native_sort() {
    let words = vec!["pear", "apple", "fig", "apple"];
    let sorted: Vec<&str> = sort_by_item(&words, Vec::<&str>::new())
        .unwrap()
        .into_iter()
        .copied()
        .collect();

    let mut expected = words.clone();
    expected.sort();
    assert_eq!(sorted, expected);
}

#[test]
fn test_keyless_sort_of_structs_uses_natural_value() {
    let people = sample_people();
    let sorted = sort_by_attribute(&people, Vec::<&str>::new()).unwrap();
    let order: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();

    assert_eq!(
        order,
        vec!["Sarah", "Wallace", "Linda", "Alex", "Jim", "Bill"]
    );
}

#[test]
fn test_missing_key_propagates() {
    let data = sample_data();
    let err = sort_by_item(&data, ["height"]).unwrap_err();
    assert!(matches!(err, SortError::MissingItem { key } if key == Key::from("height")));

    let people = sample_people();
    let err = sort_by_attribute(&people, ["height"]).unwrap_err();
    assert!(matches!(err, SortError::MissingAttribute { kind: "Person", .. }));
}

#[test]
fn test_mixed_value_kinds_fail() {
    let data = vec![json!({"v": 1}), json!({"v": "one"})];
    let err = sort_by_item(&data, ["v"]).unwrap_err();
    assert!(matches!(err, SortError::Incomparable { .. }));
}

#[test]
fn test_msort_list() {
    let mut data = SortableVec::new(sample_data());
    let returned = data.msort(["age", "name desc"]).unwrap();
    let returned_ptr: *const SortableVec<Json> = returned;

    assert!(std::ptr::eq(returned_ptr, &data));
    assert_ne!(*data, sample_data());
    assert_eq!(
        names(data.iter()),
        vec!["Wallace", "Sarah", "Linda", "Jim", "Alex", "Bill"]
    );
}

#[test]
fn test_msort_frozen() {
    let data = FrozenSeq::new(sample_data());
    let sorted = data.msort(["age", "name desc"]).unwrap();

    assert_eq!(
        names(sorted),
        vec!["Wallace", "Sarah", "Linda", "Jim", "Alex", "Bill"]
    );
    assert_eq!(&data[..], &sample_data()[..]);
}

#[test]
fn test_msort_with_configured_getter() {
    let config = SortConfig::from_json(r#"{"getter": "attrgetter"}"#).unwrap();
    let mut people = SortableVec::from_config(sample_people(), &config);
    people.msort(["-age", "name"]).unwrap();

    let order: Vec<&str> = people.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        order,
        vec!["Bill", "Alex", "Jim", "Linda", "Sarah", "Wallace"]
    );
}

#[test]
fn test_msort_rejects_invalid_getter() {
    let err = SortConfig::from_json(r#"{"getter": "methodcaller"}"#).unwrap_err();
    assert!(err.to_string().contains("item, itemgetter, attribute, attr, attrgetter"));
}

#[test]
fn test_fuzz_random_against_std() {
    let mut rng = rand::rng();

    for _ in 0..200 {
        let count = rng.random_range(0..60);
        let rows: Vec<Json> = (0..count)
            .map(|id| {
                json!({
                    "id": id,
                    "a": rng.random_range(0..4),
                    "b": rng.random_range(0..4),
                    "c": (["x", "y", "z"][rng.random_range(0..3)]),
                })
            })
            .collect();

        let sorted = sort_by_item(&rows, ["a", "-b", "c desc"]).unwrap();

        let mut expected: Vec<&Json> = rows.iter().collect();
        expected.sort_by(|x, y| {
            x["a"]
                .as_i64()
                .cmp(&y["a"].as_i64())
                .then_with(|| y["b"].as_i64().cmp(&x["b"].as_i64()))
                .then_with(|| y["c"].as_str().cmp(&x["c"].as_str()))
        });

        assert_eq!(sorted, expected);
    }
}

#[test]
fn test_sort_in_place_matches_sort() {
    let mut rng = rand::rng();
    let mut rows: Vec<Vec<i64>> = (0..500)
        .map(|_| vec![rng.random_range(0..10), rng.random_range(0..10)])
        .collect();

    let expected: Vec<Vec<i64>> = sort_by_item(&rows, ["1", "-0"])
        .unwrap()
        .into_iter()
        .cloned()
        .collect();

    sort_in_place(&mut rows, &Getter::Item, ["1", "-0"]).unwrap();
    assert_eq!(rows, expected);
}
