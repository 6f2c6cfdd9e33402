fn main() {
    let name = "cat";
    println!("hello {}", name);
}
