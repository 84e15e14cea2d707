//! Inputs shared by the parser benchmarks.

pub const SIMPLE_QUERY: &str = "{ allPersons(last: 1) { name age } }";

pub const COMPLEX_QUERY: &str = r#"
query HeroDetails($episode: Episode = JEDI, $withFriends: Boolean!, $first: Int = 10) {
  hero(episode: $episode) {
    __typename
    name
    ... on Droid {
      primaryFunction
    }
    ... on Human {
      height(unit: METER)
      starships(filter: { minCrew: 2, classes: ["freighter", "corvette"] }) {
        name
        length
      }
    }
    friends(first: $first) @include(if: $withFriends) {
      ...characterFields
    }
  }
}

fragment characterFields on Character {
  id
  name
  appearsIn
}
"#;

pub const SCHEMA: &str = r#"
"""Root query type"""
type Query {
  hero(episode: Episode = JEDI): Character
  allPersons(last: Int): [Person!]
  search(text: String!): [SearchResult!]!
}

interface Character {
  id: ID!
  name: String!
  friends(first: Int = 10): [Character]
  appearsIn: [Episode!]!
}

type Human implements Character {
  id: ID!
  name: String!
  friends(first: Int = 10): [Character]
  appearsIn: [Episode!]!
  height(unit: LengthUnit = METER): Float
  starships(filter: StarshipFilter): [Starship!]
}

type Droid implements Character {
  id: ID!
  name: String!
  friends(first: Int = 10): [Character]
  appearsIn: [Episode!]!
  primaryFunction: String
}

type Person {
  name: String!
  age: Int
}

type Starship {
  name: String!
  length: Float
}

input StarshipFilter {
  minCrew: Int = 1
  classes: [String!]
}

union SearchResult = Human | Droid | Starship

enum Episode { NEWHOPE EMPIRE JEDI }

enum LengthUnit { METER FOOT }
"#;

/// `SIMPLE_QUERY`'s selection repeated `n` times under distinct aliases.
pub fn wide_query(n: usize) -> String {
    let mut out = String::from("{\n");
    for i in 0..n {
        out.push_str(&format!("  p{i}: allPersons(last: {i}) {{ name age }}\n"));
    }
    out.push('}');
    out
}

/// A resolver result holding `n` people.
pub fn people_value(n: usize) -> String {
    let people: Vec<String> = (0..n)
        .map(|i| format!("{{ name: \"Person {i}\", age: {} }}", 20 + i % 60))
        .collect();
    format!("[{}]", people.join(", "))
}
